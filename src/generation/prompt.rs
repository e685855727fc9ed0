//! Prompt templates for document-grounded question answering

/// Prompt builder for document Q&A
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the grounded QA prompt.
    ///
    /// The instruction to answer only from the supplied document text, and
    /// to say "don't know" when the answer is absent, is a hard grounding
    /// requirement of this template.
    pub fn build_qa_prompt(question: &str, context: &str) -> String {
        format!(
            r#"You are an assistant helping with document questions. Here's a document excerpt and a question:

DOCUMENT TEXT:
{context}

QUESTION:
{question}

Please answer the question based ONLY on the provided document text. If the information isn't in the text, say you don't know.
"#,
            context = context,
            question = question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_question_and_context() {
        let prompt = PromptBuilder::build_qa_prompt("What is X?", "X is a thing.");
        assert!(prompt.contains("DOCUMENT TEXT:\nX is a thing."));
        assert!(prompt.contains("QUESTION:\nWhat is X?"));
    }

    #[test]
    fn prompt_keeps_grounding_instruction() {
        let prompt = PromptBuilder::build_qa_prompt("q", "c");
        assert!(prompt.contains("based ONLY on the provided document text"));
        assert!(prompt.contains("say you don't know"));
    }
}
