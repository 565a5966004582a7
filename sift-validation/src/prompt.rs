use sift_core::models::Prompt;
use sift_core::RetrievedDocument;

const SYSTEM: &str = "You are a rigorous evaluator of answers produced from source documents.

Score each criterion from 0 to 1:
1. coherence: logical structure and flow. Penalize contradictions, jumps and redundancy.
2. alignment: fidelity to the supplied context. Every claim must be supported by it.
3. groundedness: absence of invented information. 1.0 means every statement is in the context, 0.5 some unsupported inferences, 0.0 fabricated content.
4. completeness: whether the question is fully answered.
5. citation: presence and accuracy of [Source N] citations.

Set needs_regeneration to true if groundedness < 0.7, alignment < 0.6, the overall quality is poor, or you found serious issues.

Reply ONLY with JSON:
{\"coherence\": 0.0, \"alignment\": 0.0, \"groundedness\": 0.0, \"completeness\": 0.0, \"citation\": 0.0, \"needs_regeneration\": false, \"issues\": [\"...\"], \"assessment\": \"...\"}";

pub(crate) fn validation_prompt(query: &str, response: &str, documents: &[RetrievedDocument]) -> Prompt {
    let context = documents
        .iter()
        .enumerate()
        .map(|(idx, doc)| format!("[Source {}] ({})\n{}\n", idx + 1, doc.source(), doc.content))
        .collect::<Vec<_>>()
        .join("\n---\n");

    Prompt::new(
        SYSTEM,
        format!(
            "Source documents:\n{context}\n\nUser question:\n{query}\n\nAnswer to evaluate:\n{response}"
        ),
    )
}
