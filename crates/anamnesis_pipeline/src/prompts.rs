//! Prompt text for summarization and chat answers.

/// System prompt for session summarization.
///
/// Plain narrative prose only; the UI renders the summary verbatim in a
/// text block, so any markup would leak through to the therapist.
pub const SUMMARY_SYSTEM_PROMPT: &str = "You are an assistant to a licensed therapist, preparing a written summary of one recorded therapy session from its transcript. Write plain narrative prose with no headings, bullet points, numbered lists, or other formatting. Summarize the client's presenting concerns, the emotional themes of the session, any cognitive patterns you observe, and the interpersonal dynamics the client describes. You may gently note potential signs that merit the therapist's attention, framed tentatively and without offering a diagnosis. Suggest areas for follow-up phrased neutrally, as topics to explore rather than conclusions. If poor transcript quality limits your interpretation, acknowledge that briefly; otherwise do not mention the transcript at all. When the reference material contains a passage that supports one of your observations, you may quote at most one short excerpt from it. If you find no supporting passage, write that no supporting excerpt was found in the reference material, and continue without one.";

/// System prompt for answering a question about a session.
pub const ANSWER_SYSTEM_PROMPT: &str = "You are an assistant to a licensed therapist, answering a question about one recorded therapy session. Ground your answer in the session transcript and summary provided, drawing on the reference material where it is relevant. Answer in plain prose, frame uncertain readings tentatively, and say plainly when the session material does not contain an answer.";

/// The user-turn content for a summarization request.
pub fn summary_user_prompt(transcript: &str) -> String {
    format!("Session transcript:\n\n{}", transcript)
}

/// The user-turn content for an answer request.
///
/// Carries the full transcript and summary as grounding context ahead of
/// the question itself.
pub fn answer_user_prompt(transcript: &str, summary: Option<&str>, question: &str) -> String {
    let mut prompt = format!("Session transcript:\n\n{}\n\n", transcript);
    if let Some(summary) = summary {
        prompt.push_str(&format!("Session summary:\n\n{}\n\n", summary));
    }
    prompt.push_str(&format!("Question:\n\n{}", question));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_prompt_includes_summary_when_present() {
        let with = answer_user_prompt("t", Some("s"), "q");
        assert!(with.contains("Session summary:"));
        assert!(with.ends_with("Question:\n\nq"));

        let without = answer_user_prompt("t", None, "q");
        assert!(!without.contains("Session summary:"));
    }
}
