//! Example specifications shown by `agentgen examples`

/// Titled example documents, in the Object format
pub const EXAMPLES: &[(&str, &str)] = &[
    (
        "Simple Tools",
        r#"tools:
  - "SearchWeb(query: str)"
  - "ReadFile(path: str)"
  - "WriteFile(path: str, content: str)"
"#,
    ),
    (
        "Tools with Defaults",
        r#"tools:
  - "SearchLinkedIn(url: str)"
  - "ReadBlogPost(url: str, read_latest_n_posts: int = 3)"
  - "AnalyzeData(data: dict, method: str = 'summary')"
"#,
    ),
    (
        "Complex Types",
        r#"tools:
  - "ProcessList(items: list)"
  - "ConfigureSettings(settings: dict, validate: bool = True)"
  - "TransformData(input: Any, output_format: str = 'json')"
"#,
    ),
];
