/*!
 * Integration tests for the unique translation rule
 */

use anyhow::Result;
use serde_json::json;
use translatable_columns::database::Repository;
use translatable_columns::validation::UniqueTranslationRule;

use crate::common;

fn create_posts() -> Result<Repository> {
    common::create_test_repository(
        r#"
        CREATE TABLE posts (id INTEGER PRIMARY KEY, site INTEGER, title TEXT, heading TEXT);
        INSERT INTO posts VALUES (1, 1, '{"en":"Hello","nl":"Hallo"}', NULL);
        INSERT INTO posts VALUES (2, 2, '{"en":"Bye"}', '{"en":"Intro"}');
        INSERT INTO posts VALUES (3, 1, 'legacy', NULL);
        "#,
    )
}

#[test]
fn test_validate_withTakenValue_shouldFail() -> Result<()> {
    let repo = create_posts()?;
    let rule = UniqueTranslationRule::new("posts");

    assert!(!rule.validate(&repo, "title", &json!("Hello"), "en")?);
    assert!(!rule.validate(&repo, "title.nl", &json!("Hallo"), "en")?);
    Ok(())
}

#[test]
fn test_validate_withOtherLocale_shouldPass() -> Result<()> {
    let repo = create_posts()?;
    let rule = UniqueTranslationRule::new("posts");

    assert!(rule.validate(&repo, "title.nl", &json!("Hello"), "en")?);
    assert!(rule.validate(&repo, "title", &json!("legacy"), "en")?);
    Ok(())
}

#[test]
fn test_validate_withIgnoredRow_shouldSkipIt() -> Result<()> {
    let repo = create_posts()?;

    let rule = UniqueTranslationRule::parse(&["posts", "title", "1"])?;
    assert!(rule.validate(&repo, "title", &json!("Hello"), "en")?);

    let rule = UniqueTranslationRule::new("posts").ignore("id", json!(2));
    assert!(!rule.validate(&repo, "title", &json!("Hello"), "en")?);
    Ok(())
}

#[test]
fn test_validate_withExtraCondition_shouldNarrowRows() -> Result<()> {
    let repo = create_posts()?;

    let rule = UniqueTranslationRule::new("posts").where_eq("site", json!(2));
    assert!(rule.validate(&repo, "title", &json!("Hello"), "en")?);

    let rule = UniqueTranslationRule::parse(&["posts", "NULL", "NULL", "NULL", "site", "1"])?;
    assert!(!rule.validate(&repo, "title", &json!("Hello"), "en")?);
    Ok(())
}

#[test]
fn test_validate_withColumnOverride_shouldCheckThatColumn() -> Result<()> {
    let repo = create_posts()?;
    let rule = UniqueTranslationRule::new("posts").column("heading");

    assert!(!rule.validate(&repo, "subtitle", &json!("Intro"), "en")?);
    assert!(rule.validate(&repo, "subtitle", &json!("Hello"), "en")?);
    Ok(())
}
