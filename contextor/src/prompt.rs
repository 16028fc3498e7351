//! Prompt builders for the chat path and its tools.

use rag_store::RagHit;
use web_search::SearchResult;

/// Joins retrieved chunk texts with blank lines, preserving rank order.
pub fn join_context(hits: &[RagHit]) -> String {
    hits.iter()
        .map(|h| h.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `[1] title: snippet` lines, one per result, numbered from 1.
pub fn enumerate_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("[{}] {}: {}", i + 1, r.title, r.snippet))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strict knowledge-base prompt used in rag mode.
pub fn build_rag_prompt(context: &str, question: &str) -> String {
    format!(
        "Answer the following question based solely on the provided context.\n\
         If the answer is not in the context, simply state that you don't have that information.\n\
         \n\
         Context: {context}\n\
         \n\
         Question: {question}\n\
         \n\
         Answer:"
    )
}

/// Agent prompt: knowledge-base context plus, when present, web results and
/// their summary.
pub fn build_agent_prompt(
    context: &str,
    question: &str,
    web_results: &[SearchResult],
    web_summary: Option<&str>,
) -> String {
    let web_block = if web_results.is_empty() {
        "If the information is not in the context, say you don't know.".to_string()
    } else {
        let mut block = format!(
            "The web search results for this query show:\n{}\n",
            enumerate_results(web_results)
        );
        if let Some(summary) = web_summary {
            block.push_str(&format!("\nSummary of web search: {summary}\n"));
        }
        block.push_str(
            "\nIMPORTANT: Look carefully at these web search results and use them as your \
             primary source if they directly answer the question.",
        );
        block
    };

    format!(
        "You are an AI assistant with access to both knowledge base and web search capabilities.\n\
         \n\
         Answer the following question using the provided information.\n\
         \n\
         If the answer can be found in the context, use that information.\n\
         {web_block}\n\
         \n\
         Context from knowledge base: {context}\n\
         \n\
         Question: {question}\n\
         \n\
         Answer the question fully and comprehensively based on all available information.\n\
         If web search results are available and relevant, prioritize that information and cite it specifically."
    )
}

/// One-shot summarization of search results for the agent prompt.
pub fn build_web_summary_prompt(question: &str, results: &[SearchResult]) -> String {
    format!(
        "Below are web search results for the query: \"{question}\"\n\
         \n\
         {}\n\
         \n\
         Based only on these search results, provide a concise summary of the key facts \
         that directly answer the query. If the results don't contain relevant information, \
         state that clearly.",
        enumerate_results(results)
    )
}

/// Asks the model for `[{"credits": .., "points": ..}]` grade records.
pub fn build_grade_extraction_prompt(question: &str) -> String {
    format!(
        "Extract grade information from the following question.\n\
         Return a JSON array of objects, each with 'credits' and 'points' properties.\n\
         If the information is ambiguous or incomplete, return an empty array.\n\
         \n\
         Question: {question}\n\
         \n\
         JSON Response:"
    )
}
