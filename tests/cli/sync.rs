use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const SPANISH_CATALOG: &str = r#"msgid ""
msgstr ""
"Language: es\n"
"Plural-Forms: nplurals=2; plural=(n != 1);\n"

# reviewed
#: src/old.js:1
msgid "Delete file"
msgstr "Eliminar archivo"

msgid "Save"
msgstr "Guardar"
"#;

#[test]
fn test_sync_creates_catalogs() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.js",
        r#"_("Hello"); ngettext("{n} item", "{n} items", n)"#,
    )?;

    let output = test
        .sync_command()
        .args(["--locale", "es", "--locale", "fr"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Synchronized 2 locales with 2 messages"));

    let es = test.read_file("locales/es/messages.po")?;
    assert!(es.contains("\"Language: es\\n\""));
    assert!(es.contains("#: src/app.js:1\nmsgid \"Hello\"\nmsgstr \"\"\n"));
    assert!(es.contains("msgid_plural \"{n} items\"\nmsgstr[0] \"\"\nmsgstr[1] \"\"\n"));
    assert!(test.exists("locales/fr/messages.po"));

    Ok(())
}

#[test]
fn test_sync_rerun_is_byte_identical() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"_("Hello"); pgettext("menu", "Open")"#)?;

    test.sync_command().args(["--locale", "es"]).output()?;
    let first = test.read_file("locales/es/messages.po")?;

    let output = test.sync_command().args(["--locale", "es"]).output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("unchanged"));
    assert_eq!(test.read_file("locales/es/messages.po")?, first);

    Ok(())
}

#[test]
fn test_sync_discovers_locale_directories() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"_("Hello")"#)?;
    test.write_file("locales/es/messages.po", SPANISH_CATALOG)?;
    test.write_file("locales/de/.keep", "")?;

    let output = test.sync_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.exists("locales/de/messages.po"));
    assert!(test.read_file("locales/es/messages.po")?.contains("msgid \"Hello\""));

    Ok(())
}

#[test]
fn test_sync_fuzzy_rename() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"_("Delete the file"); _("Save")"#)?;
    test.write_file("locales/es/messages.po", SPANISH_CATALOG)?;

    let output = test.sync_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let es = test.read_file("locales/es/messages.po")?;
    assert!(es.contains(
        "#: src/app.js:1\n#, fuzzy\nmsgid \"Delete the file\"\nmsgstr \"Eliminar archivo\"\n"
    ));
    // The old entry is kept, flagged obsolete, with its comment.
    assert!(es.contains(concat!(
        "# reviewed\n#: src/old.js:1\n#, obsolete\n",
        "msgid \"Delete file\"\nmsgstr \"Eliminar archivo\"\n",
    )));
    assert!(es.contains("#: src/app.js:1\nmsgid \"Save\"\nmsgstr \"Guardar\"\n"));

    Ok(())
}

#[test]
fn test_sync_no_fuzzy() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"_("Delete the file")"#)?;
    test.write_file("locales/es/messages.po", SPANISH_CATALOG)?;

    let output = test.sync_command().arg("--no-fuzzy").output()?;

    assert!(output.status.success());
    let es = test.read_file("locales/es/messages.po")?;
    assert!(es.contains("msgid \"Delete the file\"\nmsgstr \"\"\n"));
    assert!(!es.contains("#, fuzzy"));

    Ok(())
}

#[test]
fn test_sync_fuzzy_threshold_flag() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"_("Delete selected file")"#)?;
    test.write_file("locales/es/messages.po", SPANISH_CATALOG)?;

    // similarity("Delete file", "Delete selected file") is 0.55
    test.sync_command().output()?;
    assert!(!test.read_file("locales/es/messages.po")?.contains("#, fuzzy"));

    test.write_file("locales/es/messages.po", SPANISH_CATALOG)?;
    test.sync_command()
        .args(["--fuzzy-threshold", "0.54"])
        .output()?;
    assert!(
        test.read_file("locales/es/messages.po")?
            .contains("#, fuzzy\nmsgid \"Delete selected file\"\nmsgstr \"Eliminar archivo\"\n")
    );

    Ok(())
}

#[test]
fn test_sync_default_locale_prefill() -> Result<()> {
    let test = CliTest::with_file(
        "src/cart.js",
        r#"ngettext("{n} item", "{n} items", count)"#,
    )?;

    let output = test
        .sync_command()
        .args(["--locale", "de", "--default-locale", "en"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let en = test.read_file("locales/en/messages.po")?;
    assert!(en.contains("msgstr[0] \"{n} item\"\nmsgstr[1] \"{n} items\"\n"));
    let de = test.read_file("locales/de/messages.po")?;
    assert!(de.contains("msgstr[0] \"\"\nmsgstr[1] \"\"\n"));

    Ok(())
}

#[test]
fn test_sync_malformed_catalog_fails_only_that_locale() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"_("Hello")"#)?;
    test.write_file("locales/es/messages.po", "msgid \"Hello\"\nmsgstr \"Hola\n")?;
    test.write_file("locales/fr/.keep", "")?;

    let output = test.sync_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Failed to load catalog for locale 'es'"));
    assert!(out.contains("1 of 2 locales failed"));
    assert_eq!(
        test.read_file("locales/es/messages.po")?,
        "msgid \"Hello\"\nmsgstr \"Hola\n"
    );
    assert!(test.read_file("locales/fr/messages.po")?.contains("msgid \"Hello\""));

    Ok(())
}

#[test]
fn test_sync_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"_("Hello")"#)?;

    let output = test
        .sync_command()
        .args(["--locale", "es", "--dry-run"])
        .output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("would create"));
    assert!(out.contains("Run without --dry-run"));
    assert!(!test.exists("locales/es/messages.po"));

    Ok(())
}

#[test]
fn test_sync_without_locales_fails() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"_("Hello")"#)?;

    let output = test.sync_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: No locales found"));

    Ok(())
}

#[test]
fn test_sync_rejects_invalid_threshold() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"_("Hello")"#)?;

    let output = test
        .sync_command()
        .args(["--locale", "es", "--fuzzy-threshold", "1.5"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid fuzzy threshold"));
    assert!(!test.exists("locales/es/messages.po"));

    Ok(())
}
