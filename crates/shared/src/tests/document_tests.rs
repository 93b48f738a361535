use super::*;

#[test]
fn metadata_with_only_version_projects_one_parameter() {
    let doc = SpriteDocument::from_json(
        "walker.spr",
        r#"{"SPRITE_META_DATA":{"version":"1.0"},"SPRITE_STATE_DEFAULT":{}}"#,
    )
    .expect("parse");

    let meta = doc.metadata().expect("meta block");
    assert_eq!(
        meta.parameters(),
        vec![("version".to_string(), ParamValue::Scalar("1.0".into()))]
    );
    assert!(doc.is_valid());
}

#[test]
fn numeric_and_boolean_scalars_become_text() {
    let doc = SpriteDocument::from_json(
        "walker.spr",
        r#"{"SPRITE_STATE_DEFAULT":{"cropX":12,"flipX":true,"offsY":null}}"#,
    )
    .expect("parse");

    let default = doc.default_state().expect("default block");
    assert_eq!(default.crop_x.as_deref(), Some("12"));
    assert_eq!(default.flip_x.as_deref(), Some("true"));
    assert_eq!(default.offs_y, None);
    assert!(!doc.is_valid());
}

#[test]
fn partial_credit_keeps_only_present_fields() {
    let doc = SpriteDocument::from_json(
        "walker.spr",
        r#"{"SPRITE_META_DATA":{"credits":[{"author":"avian"}]}}"#,
    )
    .expect("parse");

    let params = doc.metadata().expect("meta").parameters();
    assert_eq!(
        params,
        vec![(
            "credits".to_string(),
            ParamValue::Group(vec![vec![("author".to_string(), "avian".to_string())]])
        )]
    );
}

#[test]
fn blocks_follow_source_order() {
    let doc = SpriteDocument::from_json(
        "walker.spr",
        r#"{"SPRITE_STATE_WALK":{"uri":"w.png"},"SPRITE_META_DATA":{},"SPRITE_STATE_DEFAULT":{}}"#,
    )
    .expect("parse");

    let names: Vec<_> = doc.blocks.iter().map(StateBlock::name).collect();
    assert_eq!(
        names,
        [
            "SPRITE_STATE_WALK",
            "SPRITE_META_DATA",
            "SPRITE_STATE_DEFAULT"
        ]
    );
}

#[test]
fn animation_state_keeps_list_shape_and_stringifies_other_nesting() {
    let doc = SpriteDocument::from_json(
        "walker.spr",
        r#"{"SPRITE_STATE_JUMP":{"actions":["jump","land"],"extra":{"a":1},"frameDelay":40}}"#,
    )
    .expect("parse");

    let state = doc.animation_states().next().expect("state");
    assert_eq!(
        state.parameters,
        vec![
            (
                "actions".to_string(),
                ParamValue::List(vec!["jump".into(), "land".into()])
            ),
            ("extra".to_string(), ParamValue::Scalar(r#"{"a":1}"#.into())),
            ("frameDelay".to_string(), ParamValue::Scalar("40".into())),
        ]
    );
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = SpriteDocument::from_json("broken.spr", "{\"SPRITE_META_DATA\": ")
        .expect_err("should fail");
    assert!(matches!(err, SpriteError::Parse(_)));
}

#[test]
fn non_object_state_is_a_parse_error() {
    let err = SpriteDocument::from_json("broken.spr", r#"{"SPRITE_STATE_RUN": 5}"#)
        .expect_err("should fail");
    assert!(matches!(err, SpriteError::Parse(_)));
}

#[test]
fn unknown_fixed_block_keys_are_reported_not_kept() {
    let doc = SpriteDocument::from_json(
        "walker.spr",
        r#"{"SPRITE_META_DATA":{"version":"2","author":"x"},"SPRITE_STATE_DEFAULT":{"speed":"3"}}"#,
    )
    .expect("parse");

    assert_eq!(
        doc.ignored_fields,
        ["SPRITE_META_DATA.author", "SPRITE_STATE_DEFAULT.speed"]
    );
    assert_eq!(doc.default_state().expect("default").parameters(), vec![]);
}
