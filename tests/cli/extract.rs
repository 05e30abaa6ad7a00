use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const APP_JS: &str = r#"import { gettext as _, ngettext, pgettext } from "./i18n";

export function render(count) {
  return [
    _("Hello"),
    pgettext("menu", "Open"),
    ngettext("{n} file", "{n} files", count),
    _("Hello"),
  ];
}
"#;

const EXPECTED_TEMPLATE: &str = r#"msgid ""
msgstr ""
"Project-Id-Version: PACKAGE VERSION\n"
"MIME-Version: 1.0\n"
"Content-Type: text/plain; charset=UTF-8\n"
"Content-Transfer-Encoding: 8bit\n"
"Plural-Forms: nplurals=2; plural=(n != 1);\n"

#: src/app.js:5 src/app.js:8
msgid "Hello"
msgstr ""

#: src/app.js:7
msgid "{n} file"
msgid_plural "{n} files"
msgstr[0] ""
msgstr[1] ""

#: src/app.js:6
msgctxt "menu"
msgid "Open"
msgstr ""
"#;

#[test]
fn test_extract_writes_template() -> Result<()> {
    let test = CliTest::with_file("src/app.js", APP_JS)?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("locales/messages.pot")?, EXPECTED_TEMPLATE);
    let out = stdout(&output);
    assert!(out.contains("Extracted 3 messages (4 references) from 1 source file"));
    assert!(out.contains("locales/messages.pot"));

    Ok(())
}

#[test]
fn test_extract_to_stdout() -> Result<()> {
    let test = CliTest::with_file("src/app.js", APP_JS)?;

    let output = test.extract_command().arg("--stdout").output()?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), EXPECTED_TEMPLATE);
    assert!(!test.exists("locales/messages.pot"));

    Ok(())
}

#[test]
fn test_extract_custom_output() -> Result<()> {
    let test = CliTest::with_file("src/app.js", APP_JS)?;

    let output = test
        .extract_command()
        .args(["--output", "po/app.pot"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(test.read_file("po/app.pot")?, EXPECTED_TEMPLATE);

    Ok(())
}

#[test]
fn test_extract_is_independent_of_file_layout() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/b/second.js", r#"_("Shared"); _("Zeta")"#)?;
    test.write_file("src/a/first.ts", r#"_("Shared"); _("Alpha")"#)?;
    test.write_file("src/a/first.test.ts", r#"_("Only in tests")"#)?;

    test.extract_command().output()?;
    let template = test.read_file("locales/messages.pot")?;

    assert!(template.contains("#: src/a/first.ts:1 src/b/second.js:1\nmsgid \"Shared\""));
    assert!(!template.contains("Only in tests"));
    let alpha = template.find("\"Alpha\"").unwrap();
    let shared = template.find("\"Shared\"").unwrap();
    let zeta = template.find("\"Zeta\"").unwrap();
    assert!(alpha < shared && shared < zeta);

    Ok(())
}

#[test]
fn test_extract_uses_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".msgsyncrc.json",
        r#"{
            "includes": ["app"],
            "messagesRoot": "./i18n",
            "domain": "web",
            "functions": { "plain": ["t"], "contextual": ["tc"] }
        }"#,
    )?;
    test.write_file("app/page.jsx", r#"t("Welcome"); tc("nav", "Home"); _("ignored")"#)?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let template = test.read_file("i18n/web.pot")?;
    assert!(template.contains("msgid \"Welcome\""));
    assert!(template.contains("msgctxt \"nav\"\nmsgid \"Home\""));
    assert!(!template.contains("ignored"));

    Ok(())
}

#[test]
fn test_extract_invalid_config_fails() -> Result<()> {
    let test = CliTest::with_file(".msgsyncrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Invalid glob pattern in 'ignores'"));

    Ok(())
}
