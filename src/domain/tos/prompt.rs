//! Instruction prompt for the analysis request.

/// Delimiter fencing each embedded document.
pub const DOCUMENT_DELIMITER: &str = "---";

/// The analysis steps, in the order the model must perform them.
pub const ANALYSIS_STEPS: [(&str, &str); 10] = [
    (
        "Group by Topic",
        "Analyze the syllabus and exam questions. Group the questions by their primary topic from the syllabus.",
    ),
    (
        "Summarize Outcomes",
        "For each topic group, summarize the relevant \"Intended Learning Outcomes\" (ILOs).",
    ),
    (
        "Count Items",
        "Count the total number of exam questions for each topic.",
    ),
    (
        "Estimate Hours",
        "Estimate the number of instructional hours dedicated to each topic. If the syllabus provides clues, use them; otherwise, make a reasonable professional estimate based on the topic's depth.",
    ),
    (
        "Distribute by Bloom's Taxonomy",
        "Classify every exam question into exactly one level of Bloom's Taxonomy (Remembering, Understanding, Applying, Analyzing, Evaluating, Creating), then count how many questions of each topic fall into each level.",
    ),
    (
        "Provide Reasoning",
        "For each topic, write a brief but clear explanation for why the specific exam questions were assigned to their respective Bloom's Taxonomy levels. Reference each question number and the cognitive skill it requires (e.g., 'Question 1 requires recalling facts, placing it in Remembering. Question 5 asks for a critique, which is an Evaluating skill.').",
    ),
    (
        "List Item Placement",
        "Provide a comma-separated list of the question numbers for each topic. Every question number must appear in exactly one topic.",
    ),
    (
        "Calculate Percentage",
        "Calculate the percentage of the total exam that each topic represents.",
    ),
    (
        "Calculate Totals",
        "Create a final \"totals\" summary for all columns.",
    ),
    (
        "Format Output",
        "Format the entire output as a single JSON object strictly adhering to the provided schema, containing 'tableRows' and 'totals'.",
    ),
];

/// Builds the instruction prompt for a syllabus/exam pair.
///
/// Both documents are embedded verbatim between [`DOCUMENT_DELIMITER`] lines
/// so the model can tell instructions from content. The caller guarantees
/// neither document is blank.
pub fn build_analysis_prompt(syllabus: &str, exam: &str) -> String {
    let mut prompt = String::with_capacity(syllabus.len() + exam.len() + 4096);

    prompt.push_str(
        "As an expert in educational assessment and curriculum design, your task is to create a Table of Specifications (TOS) by analyzing the provided syllabus and exam content.\n\n",
    );
    prompt.push_str("**Instructions:**\n");
    for (index, (title, detail)) in ANALYSIS_STEPS.iter().enumerate() {
        prompt.push_str(&format!("{}. **{}:** {}\n", index + 1, title, detail));
    }

    push_document(&mut prompt, "Syllabus Content", syllabus);
    push_document(&mut prompt, "Exam Content", exam);

    prompt.push_str(
        "\nNow, perform the analysis and generate the complete JSON output for the Table of Specifications.\n",
    );
    prompt
}

fn push_document(prompt: &mut String, heading: &str, body: &str) {
    prompt.push_str(&format!("\n**{}:**\n{}\n", heading, DOCUMENT_DELIMITER));
    prompt.push_str(body);
    if !body.ends_with('\n') {
        prompt.push('\n');
    }
    prompt.push_str(DOCUMENT_DELIMITER);
    prompt.push('\n');
}
