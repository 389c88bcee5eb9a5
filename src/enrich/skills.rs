use std::sync::LazyLock;

use regex::Regex;

/// Canonical skill name and the spellings that count as a mention.
const VOCABULARY: &[(&str, &[&str])] = &[
    ("python", &["python"]),
    ("java", &["java"]),
    ("javascript", &["javascript", "js"]),
    ("typescript", &["typescript"]),
    ("golang", &["golang"]),
    ("rust", &["rust"]),
    ("c++", &["c++", "cpp"]),
    ("c#", &["c#"]),
    (".net", &[".net", "dotnet"]),
    ("asp.net", &["asp.net"]),
    ("node.js", &["node.js", "nodejs", "node"]),
    ("react", &["react", "react.js", "reactjs"]),
    ("angular", &["angular"]),
    ("vue", &["vue", "vue.js", "vuejs"]),
    ("django", &["django"]),
    ("flask", &["flask"]),
    ("fastapi", &["fastapi"]),
    ("spring", &["spring boot", "spring"]),
    ("graphql", &["graphql"]),
    ("rest", &["rest api", "rest apis", "restful"]),
    ("sql", &["sql"]),
    ("postgresql", &["postgresql", "postgres"]),
    ("mysql", &["mysql"]),
    ("mongodb", &["mongodb", "mongo"]),
    ("redis", &["redis"]),
    ("kafka", &["kafka"]),
    ("spark", &["spark", "pyspark"]),
    ("hadoop", &["hadoop"]),
    ("airflow", &["airflow"]),
    ("dbt", &["dbt"]),
    ("snowflake", &["snowflake"]),
    ("aws", &["aws"]),
    ("azure", &["azure"]),
    ("gcp", &["gcp", "google cloud"]),
    ("docker", &["docker"]),
    ("kubernetes", &["kubernetes", "k8s"]),
    ("terraform", &["terraform"]),
    ("jenkins", &["jenkins"]),
    ("git", &["git"]),
    ("linux", &["linux"]),
    ("machine learning", &["machine learning"]),
    ("deep learning", &["deep learning"]),
    ("nlp", &["nlp"]),
    ("computer vision", &["computer vision"]),
    ("tensorflow", &["tensorflow"]),
    ("pytorch", &["pytorch"]),
    ("scikit-learn", &["scikit-learn", "sklearn"]),
    ("pandas", &["pandas"]),
    ("numpy", &["numpy"]),
    ("tableau", &["tableau"]),
    ("power bi", &["power bi", "powerbi"]),
    ("excel", &["excel"]),
    ("selenium", &["selenium"]),
    ("figma", &["figma"]),
    ("android", &["android"]),
    ("ios", &["ios"]),
    ("flutter", &["flutter"]),
    ("kotlin", &["kotlin"]),
    ("swift", &["swift"]),
];

// `\b` can't anchor names that start or end in punctuation ("c++", ".net"),
// so boundaries are spelled out as "not part of a token" instead.
static PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    VOCABULARY
        .iter()
        .map(|(name, spellings)| {
            let alts: Vec<String> = spellings.iter().map(|s| regex::escape(s)).collect();
            let pat = format!(r"(?:^|[^a-z0-9_+#.])((?:{}))(?:$|[^a-z0-9_+#])", alts.join("|"));
            (*name, Regex::new(&pat).expect("valid skill regex"))
        })
        .collect()
});

/// Vocabulary skills mentioned in `text`, lowercase, in order of first mention.
pub fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut found: Vec<(usize, &'static str)> = PATTERNS
        .iter()
        .filter_map(|(name, re)| re.captures(&lower).and_then(|c| c.get(1)).map(|m| (m.start(), *name)))
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, name)| name.to_string()).collect()
}
