//! Structured output schema for the analysis response.
//!
//! Declares the two records the model must emit, `tableRows` and `totals`,
//! with exact field names, required-ness and scalar types. The tree is plain
//! data; it serializes into the OpenAPI-subset dialect accepted as a
//! `responseSchema` by the generation service (upper-case type names,
//! `propertyOrdering` to pin field order in the output).

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;

use super::blooms::BloomLevel;

/// Scalar and composite types a schema node can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
    Number,
}

/// A node in the response schema tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, SchemaNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    fn scalar(kind: SchemaType, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: Some(description.into()),
            properties: BTreeMap::new(),
            property_ordering: Vec::new(),
            required: Vec::new(),
            items: None,
        }
    }

    /// A string field.
    pub fn string(description: impl Into<String>) -> Self {
        Self::scalar(SchemaType::String, description)
    }

    /// An integer field.
    pub fn integer(description: impl Into<String>) -> Self {
        Self::scalar(SchemaType::Integer, description)
    }

    /// A floating point field.
    pub fn number(description: impl Into<String>) -> Self {
        Self::scalar(SchemaType::Number, description)
    }

    /// An object with no properties yet.
    pub fn object() -> Self {
        Self {
            kind: SchemaType::Object,
            description: None,
            properties: BTreeMap::new(),
            property_ordering: Vec::new(),
            required: Vec::new(),
            items: None,
        }
    }

    /// An array of `items`.
    pub fn array(items: SchemaNode, description: impl Into<String>) -> Self {
        Self {
            kind: SchemaType::Array,
            description: Some(description.into()),
            properties: BTreeMap::new(),
            property_ordering: Vec::new(),
            required: Vec::new(),
            items: Some(Box::new(items)),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a required property, keeping declaration order.
    pub fn with_required(mut self, name: &str, node: SchemaNode) -> Self {
        self.property_ordering.push(name.to_string());
        self.required.push(name.to_string());
        self.properties.insert(name.to_string(), node);
        self
    }

    /// Names of the required properties, in declaration order.
    pub fn required_fields(&self) -> &[String] {
        &self.required
    }

    /// Looks up a direct property by name.
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.get(name)
    }

    /// Serializes the node into the service's schema JSON.
    pub fn to_json(&self) -> serde_json::Value {
        // A tree of strings, enums and maps with string keys always serializes.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

fn blooms_distribution_schema() -> SchemaNode {
    BloomLevel::ALL.iter().fold(SchemaNode::object(), |node, level| {
        node.with_required(
            level.key(),
            SchemaNode::integer(format!(
                "Number of items at the '{}' level.",
                level.label()
            )),
        )
    })
}

fn row_schema() -> SchemaNode {
    SchemaNode::object()
        .with_required(
            "topic",
            SchemaNode::string("The main topic or subject area from the syllabus."),
        )
        .with_required(
            "intendedOutcomes",
            SchemaNode::string(
                "A summary of the Intended Learning Outcomes (ILOs) related to this topic.",
            ),
        )
        .with_required(
            "reasoning",
            SchemaNode::string(
                "A detailed explanation of why the exam questions for this topic were assigned to their respective Bloom's Taxonomy levels. This should justify the placement for each question number.",
            ),
        )
        .with_required(
            "totalItems",
            SchemaNode::integer("The total count of exam questions for this topic."),
        )
        .with_required(
            "numberOfHours",
            SchemaNode::integer(
                "An estimated number of instruction hours for this topic based on the syllabus. Make a reasonable estimate if not specified.",
            ),
        )
        .with_required("bloomsDistribution", blooms_distribution_schema())
        .with_required(
            "itemPlacement",
            SchemaNode::string(
                "A comma-separated string of the question numbers corresponding to this topic (e.g., '1, 5, 10').",
            ),
        )
        .with_required(
            "percentage",
            SchemaNode::number(
                "The percentage of the total exam items that this topic represents.",
            ),
        )
}

fn totals_schema() -> SchemaNode {
    SchemaNode::object()
        .with_description("An object containing the summation of key columns.")
        .with_required(
            "totalItems",
            SchemaNode::integer("The sum of 'totalItems' from all rows."),
        )
        .with_required(
            "numberOfHours",
            SchemaNode::integer("The sum of 'numberOfHours' from all rows."),
        )
        .with_required("bloomsDistribution", blooms_distribution_schema())
        .with_required(
            "percentage",
            SchemaNode::number("The total percentage, which should sum to 100."),
        )
}

fn build_response_schema() -> SchemaNode {
    SchemaNode::object()
        .with_required(
            "tableRows",
            SchemaNode::array(
                row_schema(),
                "An array of objects, where each object represents a row in the Table of Specifications, grouped by topic.",
            ),
        )
        .with_required("totals", totals_schema())
}

static RESPONSE_SCHEMA: Lazy<SchemaNode> = Lazy::new(build_response_schema);

/// The schema every analysis response must conform to.
pub fn response_schema() -> &'static SchemaNode {
    &RESPONSE_SCHEMA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_requires_rows_and_totals() {
        let schema = response_schema();
        assert_eq!(schema.kind, SchemaType::Object);
        assert_eq!(schema.required_fields(), ["tableRows", "totals"]);
    }

    #[test]
    fn row_fields_are_all_required_in_order() {
        let rows = response_schema().property("tableRows").unwrap();
        assert_eq!(rows.kind, SchemaType::Array);
        let row = rows.items.as_deref().unwrap();
        assert_eq!(
            row.required_fields(),
            [
                "topic",
                "intendedOutcomes",
                "reasoning",
                "totalItems",
                "numberOfHours",
                "bloomsDistribution",
                "itemPlacement",
                "percentage",
            ]
        );
        assert_eq!(row.property_ordering, row.required);
    }

    #[test]
    fn scalar_types_match_data_model() {
        let row = response_schema()
            .property("tableRows")
            .and_then(|r| r.items.as_deref())
            .unwrap();
        assert_eq!(row.property("topic").unwrap().kind, SchemaType::String);
        assert_eq!(row.property("totalItems").unwrap().kind, SchemaType::Integer);
        assert_eq!(row.property("itemPlacement").unwrap().kind, SchemaType::String);
        assert_eq!(row.property("percentage").unwrap().kind, SchemaType::Number);

        let totals = response_schema().property("totals").unwrap();
        assert_eq!(
            totals.required_fields(),
            ["totalItems", "numberOfHours", "bloomsDistribution", "percentage"]
        );
    }

    #[test]
    fn blooms_schema_has_six_integer_levels() {
        let totals = response_schema().property("totals").unwrap();
        let blooms = totals.property("bloomsDistribution").unwrap();
        assert_eq!(blooms.required_fields().len(), 6);
        for level in BloomLevel::ALL {
            assert_eq!(blooms.property(level.key()).unwrap().kind, SchemaType::Integer);
        }
    }

    #[test]
    fn serializes_to_service_dialect() {
        let json = response_schema().to_json();
        assert_eq!(json["type"], "OBJECT");
        assert_eq!(json["properties"]["tableRows"]["type"], "ARRAY");
        assert_eq!(json["properties"]["tableRows"]["items"]["type"], "OBJECT");
        assert_eq!(
            json["properties"]["tableRows"]["items"]["properties"]["percentage"]["type"],
            "NUMBER"
        );
        assert_eq!(json["propertyOrdering"][0], "tableRows");
        assert!(json.get("items").is_none());
        assert!(json["properties"]["totals"]["properties"]["totalItems"]
            .get("properties")
            .is_none());
    }
}
