// Shared prompt fragments for retrieval-augmented calls.
// Feature-specific prompts live beside the feature (see generation/prompts.rs).

/// Question-answering template that "stuffs" retrieved context ahead of the question.
/// Replace: {context}, {question}
pub const QA_STUFF_PROMPT_TEMPLATE: &str = "Use the following pieces of context to answer the question at the end. \
If you don't know the answer, just say that you don't know, don't try to make up an answer.

{context}

Question: {question}
Helpful Answer:";

/// Separator placed between retrieved chunks inside `{context}`.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Substitutes `{name}` placeholders in a single pass.
/// Values are inserted verbatim and never rescanned, so user text containing
/// braces survives unchanged. Unknown placeholders are left as-is.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });
        match value {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
