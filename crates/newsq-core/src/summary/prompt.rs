use super::SummaryRequest;

/// Fixed prompt asking for a brief context/trends/keywords summary.
pub fn build_prompt(request: &SummaryRequest) -> String {
    let date_line = request
        .date_range
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!("Date Range: {d}"))
        .unwrap_or_default();

    format!(
        "Analyze this news search query and provide a brief summary (max 200 words):\n\
         \n\
         Search Query: \"{query}\"\n\
         Region: {country}\n\
         {date_line}\n\
         \n\
         Provide:\n\
         1. Context & Background (2-3 sentences)\n\
         2. Key Trends & Topics (bullet points)\n\
         3. Related Keywords (comma-separated)\n\
         \n\
         Be concise and informative.",
        query = request.query,
        country = request.country,
    )
}
