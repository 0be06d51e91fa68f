//! Line-oriented tokenizer for the tag-value format.
//!
//! Every logical line becomes one [`Token`]: a reserved tag plus its value.
//! `<text>` blocks may span several physical lines and are folded into a
//! single token. Comments (`#`) and blank lines are skipped.

use regex::Regex;
use std::sync::LazyLock;

static DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d\d-\d\dT\d\d:\d\d:\d\dZ$").expect("static regex")
});

static ACTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(Person|Organization|Tool):\s*\S").expect("static regex"));

static CHECKSUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Za-z0-9\-]*:\s*[0-9a-fA-F]+$").expect("static regex")
});

static DOCUMENT_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^DocumentRef-\S+").expect("static regex"));

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+):\s?(.*)$").expect("static regex"));

/// Every tag the format defines, including the deprecated ones that are
/// accepted and dropped.
pub const RESERVED_TAGS: &[&str] = &[
    // Document and creation info
    "SPDXVersion",
    "DataLicense",
    "DocumentName",
    "SPDXID",
    "DocumentComment",
    "DocumentNamespace",
    "ExternalDocumentRef",
    "Creator",
    "Created",
    "CreatorComment",
    "LicenseListVersion",
    // Annotation
    "Annotator",
    "AnnotationDate",
    "AnnotationComment",
    "AnnotationType",
    "SPDXREF",
    // Relationship
    "Relationship",
    "RelationshipComment",
    // Package
    "PackageName",
    "PackageVersion",
    "PackageFileName",
    "PackageSupplier",
    "PackageOriginator",
    "PackageDownloadLocation",
    "FilesAnalyzed",
    "PackageVerificationCode",
    "PackageChecksum",
    "PackageHomePage",
    "PackageSourceInfo",
    "PackageLicenseConcluded",
    "PackageLicenseInfoFromFiles",
    "PackageLicenseDeclared",
    "PackageLicenseComments",
    "PackageCopyrightText",
    "PackageSummary",
    "PackageDescription",
    "PackageComment",
    "ExternalRef",
    "ExternalRefComment",
    "PackageAttributionText",
    "PrimaryPackagePurpose",
    "ReleaseDate",
    "BuiltDate",
    "ValidUntilDate",
    // File
    "FileName",
    "FileType",
    "FileChecksum",
    "LicenseConcluded",
    "LicenseInfoInFile",
    "FileCopyrightText",
    "LicenseComments",
    "FileComment",
    "FileNotice",
    "FileContributor",
    "FileAttributionText",
    "FileDependency",
    "ArtifactOfProjectName",
    "ArtifactOfProjectHomePage",
    "ArtifactOfProjectURI",
    // Snippet
    "SnippetSPDXID",
    "SnippetFromFileSPDXID",
    "SnippetByteRange",
    "SnippetLineRange",
    "SnippetLicenseConcluded",
    "LicenseInfoInSnippet",
    "SnippetLicenseComments",
    "SnippetCopyrightText",
    "SnippetComment",
    "SnippetName",
    "SnippetAttributionText",
    // Extracted licensing info
    "LicenseID",
    "ExtractedText",
    "LicenseName",
    "LicenseCrossReference",
    "LicenseComment",
];

/// The lexical class of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Content of a `<text>…</text>` block
    Text,
    DateTime,
    /// `Person: …`, `Organization: …` or `Tool: …`
    Actor,
    /// `ALGORITHM: hex`
    Checksum,
    /// A value starting with a `DocumentRef-` identifier
    DocumentRef,
    NoAssertion,
    None,
    /// Anything else on a single line
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub tag: String,
    /// The value with `<text>` delimiters removed; single-line values are trimmed
    pub value: String,
    pub kind: ValueKind,
    /// 1-based line of the tag
    pub line: usize,
}

impl Token {
    /// Whether the value was wrapped in `<text>`.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.kind == ValueKind::Text
    }
}

/// Classifies a single-line value.
#[must_use]
pub fn classify(value: &str) -> ValueKind {
    match value {
        crate::model::NOASSERTION => ValueKind::NoAssertion,
        crate::model::NONE => ValueKind::None,
        v if DATETIME.is_match(v) => ValueKind::DateTime,
        v if ACTOR.is_match(v) => ValueKind::Actor,
        v if CHECKSUM.is_match(v) => ValueKind::Checksum,
        v if DOCUMENT_REF.is_match(v) => ValueKind::DocumentRef,
        _ => ValueKind::Line,
    }
}

/// Splits `input` into tokens. Lines that are not `Tag: value`, unknown tags
/// and unterminated text blocks are reported in the second return value and
/// skipped.
pub fn tokenize(input: &str) -> (Vec<Token>, Vec<String>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lines = input.lines().enumerate().peekable();

    while let Some((index, raw)) = lines.next() {
        let line_number = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some(caps) = TAG.captures(trimmed) else {
            errors.push(format!(
                "Line does not match the form \"Tag: value\". Line: {line_number}"
            ));
            continue;
        };
        let tag = caps.get(1).map_or("", |m| m.as_str()).to_string();
        let rest = caps.get(2).map_or("", |m| m.as_str()).trim_start();

        let (value, kind) = if let Some(opened) = rest.strip_prefix("<text>") {
            match read_text_block(opened, &mut lines) {
                Some(text) => (text, ValueKind::Text),
                None => {
                    errors.push(format!(
                        "Unterminated <text> block for tag {tag}. Line: {line_number}"
                    ));
                    continue;
                }
            }
        } else {
            let value = rest.trim().to_string();
            let kind = classify(&value);
            (value, kind)
        };

        if !RESERVED_TAGS.contains(&tag.as_str()) {
            errors.push(format!("Unknown tag provided in line {line_number}"));
            continue;
        }
        tokens.push(Token {
            tag,
            value,
            kind,
            line: line_number,
        });
    }
    (tokens, errors)
}

/// Collects a text block whose first line starts with `first`. Returns the
/// content between the delimiters, or `None` if `</text>` never appears.
fn read_text_block<'a, I>(first: &str, lines: &mut std::iter::Peekable<I>) -> Option<String>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    if let Some(end) = first.find("</text>") {
        return Some(first[..end].to_string());
    }
    let mut text = first.to_string();
    for (_, raw) in lines.by_ref() {
        text.push('\n');
        if let Some(end) = raw.find("</text>") {
            text.push_str(&raw[..end]);
            return Some(text);
        }
        text.push_str(raw);
    }
    None
}
