//! End-to-end tests over the sample document tree
//!
//! Every file under `test-fixtures/documents` goes through
//! detect -> parse -> flatten -> store -> rebuild -> recompose -> verify.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use sectree_content::{DetectorConfig, Format, FormatDetector, decompose};
use sectree_store::{DirectoryStore, DocumentStore, MemoryStore, StoredDocument, checkout};
use sectree_test_utils::strategies;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn documents_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/documents")
}

/// `(relative path with '/' separators, content)` for every fixture file
fn load_documents() -> Vec<(String, String)> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<(String, String)>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                let relative = path.strip_prefix(root).unwrap();
                let key = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                out.push((key, fs::read_to_string(&path).unwrap()));
            }
        }
    }

    let root = documents_root();
    let mut documents = Vec::new();
    walk(&root, &root, &mut documents);
    documents.sort();
    assert!(!documents.is_empty(), "no fixtures under {}", root.display());
    documents
}

#[rstest]
#[case(".claude/agents/reviewer.md", "agent", Format::HeadingStructured)]
#[case(".claude/skills/pdf/SKILL.md", "skill", Format::HeadingStructured)]
#[case(".claude/commands/git/commit.md", "command", Format::TagStructured)]
#[case(".cursor/rules/style.mdc", "rule", Format::HeadingStructured)]
#[case("CLAUDE.md", "instructions", Format::Mixed)]
#[case("README.md", "readme", Format::HeadingStructured)]
#[case("prompts/system.md", "document", Format::TagStructured)]
#[case("docs/windows.md", "document", Format::HeadingStructured)]
#[case("docs/broken-frontmatter.md", "document", Format::HeadingStructured)]
fn fixture_documents_detect_as_expected(
    #[case] path: &str,
    #[case] category: &str,
    #[case] format: Format,
) {
    let content = fs::read_to_string(documents_root().join(path)).unwrap();
    let detection = sectree_content::detect(path, &content);
    assert_eq!(detection.category.as_str(), category);
    assert_eq!(detection.format, format);
}

#[test]
fn every_document_survives_the_full_pipeline() {
    init_tracing();
    let detector = FormatDetector::default();
    let dir = tempfile::tempdir().unwrap();
    let mut store = DirectoryStore::open(dir.path()).unwrap();

    let documents = load_documents();
    for (path, content) in &documents {
        let doc = decompose(&detector, path, content);
        assert!(doc.tree().validate().is_ok(), "{path}");
        store.put(StoredDocument::from_parsed(&doc, content)).unwrap();
    }

    assert_eq!(store.paths().unwrap().len(), documents.len());
    for (path, content) in &documents {
        assert_eq!(&checkout(&store, path).unwrap(), content, "{path}");
    }
}

#[test]
fn frontmatter_is_separated_from_body() {
    let documents = load_documents();
    let (path, content) = documents
        .iter()
        .find(|(path, _)| path.ends_with("reviewer.md"))
        .unwrap();

    let doc = decompose(&FormatDetector::default(), path, content);
    assert!(doc.frontmatter.starts_with("name: reviewer\n"));
    assert!(doc.sections[0].is_orphaned());
    assert_eq!(doc.find("Style").map(|s| s.level()), Some(3));
}

#[test]
fn broken_frontmatter_stays_in_the_body() {
    let content = fs::read_to_string(documents_root().join("docs/broken-frontmatter.md")).unwrap();
    let doc = decompose(&FormatDetector::default(), "docs/broken-frontmatter.md", &content);
    assert_eq!(doc.frontmatter, "");
    assert!(doc.sections[0].content.starts_with("---\n"));
    assert_eq!(doc.recompose(), content);
}

#[test]
fn custom_categories_from_toml() {
    let config = DetectorConfig::from_str_with_extension(
        r#"
default_category = "misc"

[[categories]]
name = "prompt"
patterns = ["prompts/*.md"]
"#,
        "toml",
    )
    .unwrap();
    let detector = FormatDetector::new(&config).unwrap();

    let mut store = MemoryStore::new();
    for (path, content) in load_documents() {
        store
            .put(StoredDocument::ingest(&detector, &path, &content))
            .unwrap();
    }

    assert_eq!(store.get("prompts/system.md").unwrap().category.as_str(), "prompt");
    assert_eq!(store.get("CLAUDE.md").unwrap().category.as_str(), "misc");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_documents_check_out_unchanged(content in strategies::document()) {
        let mut store = MemoryStore::new();
        store
            .put(StoredDocument::ingest(&FormatDetector::default(), "gen.md", &content))
            .unwrap();
        prop_assert_eq!(checkout(&store, "gen.md").unwrap(), content);
    }
}
