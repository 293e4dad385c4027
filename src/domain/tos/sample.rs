//! Built-in sample inputs and a matching analysis result.
//!
//! Used by the `sample` CLI command and as a fixture throughout the tests.

use super::blooms::{BloomLevel, BloomsDistribution};
use super::result::{TOSResult, TOSRow, TOSTotals};

/// Sample course syllabus (BIO-101).
pub const SAMPLE_SYLLABUS: &str = "\
Course: Introduction to Biology (BIO-101)

Course Description: This course provides a comprehensive overview of the fundamental principles of biology, covering topics from the molecular basis of life to the complexity of ecosystems. It is estimated to take 18 hours of instruction.

Intended Learning Outcomes (ILOs):
Upon successful completion of this course, students will be able to:
1.  Remember the basic structures and functions of eukaryotic cells. (Cognitive Domain: Remembering)
2.  Understand the process of photosynthesis and cellular respiration. (Cognitive Domain: Understanding)
3.  Apply Mendelian genetics principles to solve basic inheritance problems. (Cognitive Domain: Applying)
4.  Analyze the relationships between different trophic levels in an ecosystem. (Cognitive Domain: Analyzing)
5.  Evaluate the evidence for the theory of evolution by natural selection. (Cognitive Domain: Evaluating)
6.  Create a simple dichotomous key for classifying a given set of organisms. (Cognitive Domain: Creating)
";

/// Sample midterm exam matching [`SAMPLE_SYLLABUS`].
pub const SAMPLE_EXAM: &str = "\
Midterm Examination - BIO-101 (Total 6 items)

Instructions: Answer all questions to the best of your ability.

Section A: Multiple Choice & Short Answer

1.  Label the parts of the animal cell provided in the diagram. (Mitochondria, Nucleus, Cell Membrane)
2.  Explain in your own words why plants appear green.
3.  A tall pea plant (TT) is crossed with a short pea plant (tt). What percentage of the offspring will be tall? Show your Punnett square.
4.  Describe the flow of energy from producers to primary consumers in a food web.
5.  Critique the argument that \"evolution is just a theory\" by explaining the scientific definition of a theory.
6.  You are given 5 different leaves. Design a set of yes/no questions that could be used to identify each one uniquely.
";

fn sample_row(
    topic: &str,
    outcome: &str,
    reasoning: &str,
    level: BloomLevel,
    question: u32,
) -> TOSRow {
    TOSRow {
        topic: topic.to_string(),
        intended_outcomes: outcome.to_string(),
        reasoning: reasoning.to_string(),
        total_items: 1,
        number_of_hours: 3,
        blooms_distribution: BloomsDistribution::single(level, 1),
        item_placement: question.to_string(),
        percentage: 16.7,
    }
}

/// The analysis of [`SAMPLE_SYLLABUS`] and [`SAMPLE_EXAM`]: six topics with
/// one item and three hours each, one Bloom's level per topic.
pub fn sample_result() -> TOSResult {
    TOSResult {
        table_rows: vec![
            sample_row(
                "Cell Biology",
                "Remember the basic structures and functions of eukaryotic cells.",
                "Question 1 asks students to label parts of a cell diagram. This is a direct recall of factual information, which squarely falls under the 'Remembering' category of Bloom's Taxonomy.",
                BloomLevel::Remembering,
                1,
            ),
            sample_row(
                "Photosynthesis",
                "Understand the process of photosynthesis and cellular respiration.",
                "Question 2 requires an explanation in the student's own words. This demonstrates comprehension of a concept rather than just recalling a definition, placing it at the 'Understanding' level.",
                BloomLevel::Understanding,
                2,
            ),
            sample_row(
                "Genetics",
                "Apply Mendelian genetics principles to solve basic inheritance problems.",
                "Question 3 requires students to use a known principle (Mendelian genetics) and a tool (Punnett square) to solve a specific problem. This is a classic 'Applying' task.",
                BloomLevel::Applying,
                3,
            ),
            sample_row(
                "Ecology",
                "Analyze the relationships between different trophic levels in an ecosystem.",
                "Question 4 asks students to describe the flow of energy, which involves breaking down the concept of a food web into its component parts and showing the relationship between them. This is characteristic of the 'Analyzing' level.",
                BloomLevel::Analyzing,
                4,
            ),
            sample_row(
                "Evolution",
                "Evaluate the evidence for the theory of evolution by natural selection.",
                "Question 5 requires students to 'critique' an argument. This involves making a judgment based on criteria (the scientific definition of a theory), which is a higher-order thinking skill at the 'Evaluating' level.",
                BloomLevel::Evaluating,
                5,
            ),
            sample_row(
                "Taxonomy/Classification",
                "Create a simple dichotomous key for classifying a given set of organisms.",
                "Question 6 asks students to 'design' a new tool (a dichotomous key) to fulfill a specific purpose. This act of generating a new product or structure is the essence of the 'Creating' level.",
                BloomLevel::Creating,
                6,
            ),
        ],
        totals: TOSTotals {
            total_items: 6,
            number_of_hours: 18,
            blooms_distribution: BloomsDistribution::new([1; 6]),
            percentage: 100.0,
        },
    }
}
