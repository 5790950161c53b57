//! Unit tests for parsing, validation and duplicate handling.

use std::path::Path;

use anyhow::{Context, Result, anyhow, ensure};
use rstest::rstest;
use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::ErrorKind;

const PATH: &str = "/home/ada/mcp.json";

fn parse(text: &str) -> ConfigResult<ConfigDocument> {
    ConfigLoader::new().parse(Path::new(PATH), text)
}

fn validation_key(result: ConfigResult<ConfigDocument>) -> Result<String> {
    match result {
        Err(McpConfigError::Validation { key, .. }) => Ok(key),
        other => Err(anyhow!("expected validation error, got {other:?}")),
    }
}

#[test]
fn valid_document_exposes_servers() -> Result<()> {
    let document = parse(
        r#"{"mcpServers": {"test_server": {"command": "echo", "args": ["test"]}}}"#,
    )?;
    ensure!(document.path() == Path::new(PATH));
    ensure!(document.section_key() == "mcpServers");
    ensure!(document.server_names().collect::<Vec<_>>() == ["test_server"]);
    ensure!(
        document.servers().get("test_server")
            == Some(&json!({"command": "echo", "args": ["test"]}))
    );
    Ok(())
}

#[test]
fn server_names_come_back_sorted() -> Result<()> {
    let document = parse(r#"{"mcpServers": {"zeta": {}, "alpha": {}, "mid": {}}}"#)?;
    ensure!(document.server_names().collect::<Vec<_>>() == ["alpha", "mid", "zeta"]);
    Ok(())
}

#[test]
fn empty_section_is_valid() -> Result<()> {
    let document = parse(r#"{"mcpServers": {}}"#)?;
    ensure!(document.servers().is_empty());
    Ok(())
}

#[test]
fn malformed_json_reports_position() -> Result<()> {
    match parse("{\n  \"mcpServers\": {,}\n}") {
        Err(McpConfigError::Parse { line, column, .. }) => {
            ensure!(line == 2, "unexpected line {line}");
            ensure!(column > 0, "unexpected column {column}");
            Ok(())
        }
        other => Err(anyhow!("expected parse error, got {other:?}")),
    }
}

#[rstest]
#[case::empty("")]
#[case::whitespace("  \n")]
#[case::truncated(r#"{"mcpServers": {"#)]
#[case::trailing(r#"{"mcpServers": {}} extra"#)]
#[case::comment("// servers\n{\"mcpServers\": {}}")]
fn invalid_syntax_is_a_parse_error(#[case] text: &str) {
    let err = parse(text).expect_err("syntax error must not load");
    assert_eq!(err.kind(), ErrorKind::Parse, "{err}");
}

#[rstest]
#[case::array("[]", "<document>")]
#[case::string(r#""mcpServers""#, "<document>")]
#[case::null("null", "<document>")]
#[case::missing_section(r#"{"servers": {}}"#, "mcpServers")]
#[case::section_array(r#"{"mcpServers": []}"#, "mcpServers")]
#[case::section_null(r#"{"mcpServers": null}"#, "mcpServers")]
fn wrong_shape_is_a_validation_error(#[case] text: &str, #[case] key: &str) -> Result<()> {
    let actual = validation_key(parse(text))?;
    ensure!(actual == key, "expected key {key}, got {actual}");
    Ok(())
}

#[test]
fn validation_message_names_found_type() -> Result<()> {
    let err = parse(r#"{"mcpServers": "echo"}"#)
        .err()
        .context("expected validation error")?;
    let message = err.to_string();
    ensure!(message.contains("found a string"), "message: {message}");
    ensure!(message.contains(PATH), "message: {message}");
    Ok(())
}

#[test]
fn duplicate_server_names_are_rejected() -> Result<()> {
    let text = r#"{"mcpServers": {
        "a": {"command": "first"},
        "b": {"command": "other"},
        "a": {"command": "second"}
    }}"#;
    let key = validation_key(parse(text))?;
    ensure!(key == "mcpServers.a", "unexpected key {key}");
    Ok(())
}

#[rstest]
#[case::both_objects(
    r#"{"mcpServers": {"a": {"command": "x"}}, "mcpServers": {"b": {"command": "y"}}}"#
)]
#[case::number_first(r#"{"mcpServers": 1, "mcpServers": {"a": {"command": "x"}}}"#)]
#[case::array_first(r#"{"mcpServers": [1, {"a": 2}], "mcpServers": {"a": {"command": "x"}}}"#)]
#[case::null_first(r#"{"mcpServers": null, "mcpServers": {}}"#)]
#[case::three_times(r#"{"mcpServers": {}, "mcpServers": "x", "mcpServers": {}}"#)]
fn duplicate_section_is_rejected(#[case] text: &str) -> Result<()> {
    let result = parse(text);
    if let Err(err) = &result {
        ensure!(err.kind() == ErrorKind::Validation, "unexpected error {err}");
    }
    let key = validation_key(result)?;
    ensure!(key == "mcpServers", "unexpected key {key}");
    Ok(())
}

#[test]
fn last_wins_policy_keeps_final_occurrence() -> Result<()> {
    let text = r#"{"mcpServers": {"a": {"command": "first"}, "a": {"command": "second"}}}"#;
    let document = ConfigLoader::new()
        .duplicate_keys(DuplicateKeys::LastWins)
        .parse(Path::new(PATH), text)?;
    ensure!(document.servers().len() == 1);
    ensure!(document.servers().get("a") == Some(&json!({"command": "second"})));
    Ok(())
}

#[test]
fn repeated_keys_outside_server_names_are_allowed() -> Result<()> {
    let text = r#"{
        "logging": {"level": "info", "level": "debug"},
        "mcpServers": {"a": {"command": "x", "args": [], "args": ["y"]}}
    }"#;
    let document = parse(text)?;
    ensure!(document.server_names().collect::<Vec<_>>() == ["a"]);
    Ok(())
}

#[test]
fn custom_section_key_is_honoured() -> Result<()> {
    let loader = ConfigLoader::new().section_key("servers");
    let document = loader.parse(Path::new(PATH), r#"{"servers": {"a": {"command": "x"}}}"#)?;
    ensure!(document.section_key() == "servers");
    let missing = loader.parse(Path::new(PATH), r#"{"mcpServers": {}}"#);
    ensure!(validation_key(missing)? == "servers");
    Ok(())
}

#[test]
fn document_round_trips_other_sections() -> Result<()> {
    let original = json!({
        "mcpServers": {"a": {"command": "x", "args": ["1", "2"]}},
        "settings": {"timeout": 30}
    });
    let document = parse(&original.to_string())?;
    ensure!(document.other_sections().get("settings") == Some(&json!({"timeout": 30})));
    ensure!(document.to_value() == original);
    ensure!(document.document().get("mcpServers") == original.get("mcpServers"));
    ensure!(serde_json::Value::Object(document.into_document()) == original);
    Ok(())
}

#[test]
fn server_descriptors_are_typed() -> Result<()> {
    let document = parse(
        r#"{"mcpServers": {
            "echo": {"command": "echo", "args": ["hi"], "env": {"A": "1"}},
            "bare": {"command": "true"}
        }}"#,
    )?;
    let descriptors = document.server_descriptors()?;
    let echo = descriptors.get("echo").context("echo descriptor")?;
    ensure!(echo.command == "echo");
    ensure!(echo.args == ["hi"]);
    ensure!(echo.env.get("A").map(String::as_str) == Some("1"));
    let bare = descriptors.get("bare").context("bare descriptor")?;
    ensure!(bare.args.is_empty() && bare.env.is_empty());
    Ok(())
}

#[test]
fn malformed_descriptor_names_the_server() -> Result<()> {
    let document = parse(r#"{"mcpServers": {"broken": {"args": ["x"]}}}"#)?;
    match document.server_descriptors() {
        Err(McpConfigError::Validation { key, message, .. }) => {
            ensure!(key == "mcpServers.broken", "unexpected key {key}");
            ensure!(message.contains("command"), "unexpected message {message}");
            Ok(())
        }
        other => Err(anyhow!("expected validation error, got {other:?}")),
    }
}

#[test]
fn unreadable_file_is_a_read_error() -> Result<()> {
    let dir = TempDir::new().context("create temp dir")?;
    let missing = dir.path().join("gone.json");
    let err = ConfigLoader::new()
        .load_path(&missing)
        .err()
        .context("expected read error")?;
    ensure!(err.kind() == ErrorKind::Read, "unexpected error {err}");
    ensure!(err.to_string().contains("gone.json"));
    Ok(())
}

#[rstest]
#[case::leading_bytes(&[0xff, 0xfe, b'{', b'}'], 0)]
#[case::inside_string(b"{\"mcpServers\": {\"caf\xe9\": {}}}", 20)]
fn non_utf8_file_is_an_encoding_error(#[case] bytes: &[u8], #[case] offset: usize) -> Result<()> {
    let dir = TempDir::new().context("create temp dir")?;
    let path = dir.path().join("latin1.json");
    std::fs::write(&path, bytes).context("write non-UTF-8 file")?;
    let err = ConfigLoader::new()
        .load_path(&path)
        .err()
        .context("expected encoding error")?;
    ensure!(err.kind() == ErrorKind::Parse, "unexpected error {err}");
    match err {
        McpConfigError::Encoding { valid_up_to, .. } => {
            ensure!(valid_up_to == offset, "unexpected offset {valid_up_to}");
        }
        other => return Err(anyhow!("expected encoding error, got {other:?}")),
    }
    Ok(())
}

#[test]
fn load_path_reads_from_disk() -> Result<()> {
    let dir = TempDir::new().context("create temp dir")?;
    let path = dir.path().join("mcp.json");
    std::fs::write(&path, r#"{"mcpServers": {"disk": {"command": "cat"}}}"#)
        .context("write config")?;
    let document = ConfigLoader::new().load_path(&path)?;
    ensure!(document.path() == path.as_path());
    ensure!(document.server_names().collect::<Vec<_>>() == ["disk"]);
    Ok(())
}
