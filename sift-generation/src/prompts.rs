use sift_core::models::Prompt;
use sift_core::Intent;

const SEARCH_SYSTEM: &str = "You answer questions precisely using documents.

Instructions:
1. Answer using ONLY the information in the provided context.
2. Be precise and concise.
3. ALWAYS cite sources with the format [Source N].
4. If the context does not contain the answer, say so plainly.
5. Never invent or assume information missing from the context.

Every claim carries its citation, e.g. \"Ownership is checked at compile time [Source 1].\"";

const SUMMARY_SYSTEM: &str = "You synthesize information from several documents.

Instructions:
1. Read every document in the context.
2. Extract the most important key points and drop redundancy.
3. Organize them logically: a short introduction, 3-5 key points, a closing synthesis.
4. Use bullets or numbering for clarity.
5. Cite the sources of each key point as [Source N] or [Source N, M].
6. Stay objective.";

const COMPARISON_SYSTEM: &str = "You compare concepts using documents.

Instructions:
1. Identify the elements being compared.
2. Extract what the context says about each.
3. Cover similarities AND differences in balance, point by point or as a table.
4. Cite the sources for each compared element as [Source N].
5. End with a short comparative conclusion.
6. Stay objective.";

const CONVERSATIONAL_SYSTEM: &str = "You are a friendly, helpful conversational assistant.
Answer general questions naturally, concisely, and directly.
If a question needs information from specific documents, say you do not have access to it.";

/// Prompt for an answer grounded in `context`.
pub(crate) fn grounded_prompt(query: &str, intent: Intent, context: &str) -> Prompt {
    let (system, ask) = match intent {
        Intent::Summary => (SUMMARY_SYSTEM, "Topic to summarize"),
        Intent::Comparison => (COMPARISON_SYSTEM, "Requested comparison"),
        Intent::Search | Intent::General => (SEARCH_SYSTEM, "Question"),
    };
    Prompt::new(
        system,
        format!("Document context:\n{context}\n\n{ask}: {query}"),
    )
}

/// Prompt for a reply that uses no documents.
pub(crate) fn conversational_prompt(query: &str) -> Prompt {
    Prompt::new(CONVERSATIONAL_SYSTEM, query)
}
