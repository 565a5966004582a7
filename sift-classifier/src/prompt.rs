use sift_core::models::Prompt;

const SYSTEM_PROMPT: &str = r#"You classify user queries for a document question-answering system.

Assign the query to exactly ONE of these intents:

1. search: the user wants specific information, facts, or data from the document collection.
   Examples: "What is type 2 diabetes?", "Give me information about cancer treatments". Needs documents: yes.
2. summary: the user wants a summary of one or more documents or of a topic they cover.
   Examples: "Summarize the article on hypertension", "Give me an overview of the documents". Needs documents: yes.
3. comparison: the user wants to compare two or more documents or concepts.
   Examples: "Compare treatment A with treatment B", "Differences between type 1 and type 2 diabetes". Needs documents: yes.
4. general: conversation that does NOT need the documents.
   Examples: "How are you?", "Tell me a joke". Needs documents: no.

Rules:
- Judge the user's real intent, not surface keywords.
- When torn between intents, pick the more specific one.
- Report an honest confidence between 0.0 and 1.0.

Reply with ONLY a JSON object:
{"intent": "search|summary|comparison|general", "confidence": 0.0, "requires_retrieval": true, "reasoning": "one sentence"}"#;

pub(crate) fn classification_prompt(query: &str) -> Prompt {
    Prompt::new(SYSTEM_PROMPT, query)
}
