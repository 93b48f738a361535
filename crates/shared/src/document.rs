//! Typed view of a sprite definition file.
//!
//! The two fixed blocks are deserialized against their schema; every other
//! top-level key is an animation state read generically. Scalars are kept as
//! text whatever their JSON type, since the editor writes strings back.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{
    domain::{GroupKind, ListKind, DEFAULT_STATE, META_DATA_STATE},
    error::{SpriteError, SpriteResult},
};

/// Sub-fields present in one group element, in emission order.
pub type GroupEntry = Vec<(String, String)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
    Group(Vec<GroupEntry>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credit {
    #[serde(default, deserialize_with = "lenient_text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnRule {
    #[serde(default, deserialize_with = "lenient_text")]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub spawn_x: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub spawn_y: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub spawn_explode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default, deserialize_with = "lenient_text")]
    pub x: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub y: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub w: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub h: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataBlock {
    #[serde(default, deserialize_with = "lenient_text")]
    pub version: Option<String>,
    #[serde(default)]
    pub credits: Option<Vec<Credit>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub flags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub actions: Option<Vec<String>>,
    #[serde(default)]
    pub spawn: Option<Vec<SpawnRule>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultStateBlock {
    #[serde(default, deserialize_with = "lenient_text")]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub crop_x: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub crop_y: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub crop_w: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub crop_h: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub transparent: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub frame_delay: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub size_multiplier: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub size_divider: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub auto_close: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub is_chain: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub flip_x: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub offs_x: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub offs_y: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub use_previous: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub walk_multiplier: Option<String>,
    #[serde(default)]
    pub fixtures: Option<Vec<Fixture>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationStateBlock {
    pub name: String,
    pub parameters: Vec<(String, ParamValue)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateBlock {
    Metadata(MetadataBlock),
    Default(DefaultStateBlock),
    Animation(AnimationStateBlock),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteDocument {
    pub file_name: String,
    /// Blocks in source order.
    pub blocks: Vec<StateBlock>,
    /// `STATE.field` keys of the fixed blocks that the schema does not know.
    pub ignored_fields: Vec<String>,
}

impl MetadataBlock {
    pub const FIELDS: [&'static str; 5] = ["version", "credits", "flags", "actions", "spawn"];

    /// Present fields only, in schema order.
    pub fn parameters(&self) -> Vec<(String, ParamValue)> {
        let mut out = Vec::new();
        push_scalar(&mut out, "version", &self.version);
        if let Some(credits) = &self.credits {
            let entries = credits.iter().map(Credit::entry).collect();
            out.push((GroupKind::Credits.name().into(), ParamValue::Group(entries)));
        }
        push_list(&mut out, ListKind::Flags, &self.flags);
        push_list(&mut out, ListKind::Actions, &self.actions);
        if let Some(spawn) = &self.spawn {
            let entries = spawn.iter().map(SpawnRule::entry).collect();
            out.push((GroupKind::Spawn.name().into(), ParamValue::Group(entries)));
        }
        out
    }
}

impl DefaultStateBlock {
    pub const FIELDS: [&'static str; 17] = [
        "uri",
        "cropX",
        "cropY",
        "cropW",
        "cropH",
        "transparent",
        "frameDelay",
        "sizeMultiplier",
        "sizeDivider",
        "autoClose",
        "isChain",
        "flipX",
        "offsX",
        "offsY",
        "usePrevious",
        "walkMultiplier",
        "fixtures",
    ];

    /// Present fields only, in schema order.
    pub fn parameters(&self) -> Vec<(String, ParamValue)> {
        let mut out = Vec::new();
        let scalars = [
            ("uri", &self.uri),
            ("cropX", &self.crop_x),
            ("cropY", &self.crop_y),
            ("cropW", &self.crop_w),
            ("cropH", &self.crop_h),
            ("transparent", &self.transparent),
            ("frameDelay", &self.frame_delay),
            ("sizeMultiplier", &self.size_multiplier),
            ("sizeDivider", &self.size_divider),
            ("autoClose", &self.auto_close),
            ("isChain", &self.is_chain),
            ("flipX", &self.flip_x),
            ("offsX", &self.offs_x),
            ("offsY", &self.offs_y),
            ("usePrevious", &self.use_previous),
            ("walkMultiplier", &self.walk_multiplier),
        ];
        for (name, value) in scalars {
            push_scalar(&mut out, name, value);
        }
        if let Some(fixtures) = &self.fixtures {
            let entries = fixtures.iter().map(Fixture::entry).collect();
            out.push((
                GroupKind::Fixtures.name().into(),
                ParamValue::Group(entries),
            ));
        }
        out
    }
}

impl Credit {
    fn entry(&self) -> GroupEntry {
        present_fields(&[
            ("author", &self.author),
            ("description", &self.description),
            ("url", &self.url),
        ])
    }
}

impl SpawnRule {
    fn entry(&self) -> GroupEntry {
        present_fields(&[
            ("uri", &self.uri),
            ("spawnX", &self.spawn_x),
            ("spawnY", &self.spawn_y),
            ("spawnExplode", &self.spawn_explode),
        ])
    }
}

impl Fixture {
    fn entry(&self) -> GroupEntry {
        present_fields(&[
            ("x", &self.x),
            ("y", &self.y),
            ("w", &self.w),
            ("h", &self.h),
        ])
    }
}

impl AnimationStateBlock {
    /// Reads every property of `object` in document order. List and group
    /// names keep their shape when the array fits it; anything else becomes
    /// a scalar.
    pub fn from_object(name: impl Into<String>, object: &Map<String, Value>) -> Self {
        let parameters = object
            .iter()
            .map(|(key, value)| (key.clone(), animation_param(key, value)))
            .collect();
        Self {
            name: name.into(),
            parameters,
        }
    }
}

impl StateBlock {
    pub fn name(&self) -> &str {
        match self {
            StateBlock::Metadata(_) => META_DATA_STATE,
            StateBlock::Default(_) => DEFAULT_STATE,
            StateBlock::Animation(state) => &state.name,
        }
    }

    pub fn parameters(&self) -> Vec<(String, ParamValue)> {
        match self {
            StateBlock::Metadata(block) => block.parameters(),
            StateBlock::Default(block) => block.parameters(),
            StateBlock::Animation(state) => state.parameters.clone(),
        }
    }
}

impl SpriteDocument {
    pub fn from_json(file_name: impl Into<String>, text: &str) -> SpriteResult<Self> {
        let root: Map<String, Value> = serde_json::from_str(text)?;
        let mut blocks = Vec::with_capacity(root.len());
        let mut ignored_fields = Vec::new();
        for (key, value) in root {
            let block = match key.as_str() {
                META_DATA_STATE => {
                    collect_unknown(&key, &value, &MetadataBlock::FIELDS, &mut ignored_fields);
                    StateBlock::Metadata(fixed_block(&key, value)?)
                }
                DEFAULT_STATE => {
                    collect_unknown(
                        &key,
                        &value,
                        &DefaultStateBlock::FIELDS,
                        &mut ignored_fields,
                    );
                    StateBlock::Default(fixed_block(&key, value)?)
                }
                _ => {
                    let Value::Object(object) = value else {
                        return Err(SpriteError::Parse(format!(
                            "state '{key}' must be a JSON object"
                        )));
                    };
                    StateBlock::Animation(AnimationStateBlock::from_object(key, &object))
                }
            };
            blocks.push(block);
        }

        Ok(Self {
            file_name: file_name.into(),
            blocks,
            ignored_fields,
        })
    }

    pub fn metadata(&self) -> Option<&MetadataBlock> {
        self.blocks.iter().find_map(|block| match block {
            StateBlock::Metadata(meta) => Some(meta),
            _ => None,
        })
    }

    pub fn default_state(&self) -> Option<&DefaultStateBlock> {
        self.blocks.iter().find_map(|block| match block {
            StateBlock::Default(default) => Some(default),
            _ => None,
        })
    }

    pub fn animation_states(&self) -> impl Iterator<Item = &AnimationStateBlock> {
        self.blocks.iter().filter_map(|block| match block {
            StateBlock::Animation(state) => Some(state),
            _ => None,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.metadata().is_some() && self.default_state().is_some()
    }
}

fn fixed_block<T: for<'de> Deserialize<'de>>(key: &str, value: Value) -> SpriteResult<T> {
    serde_json::from_value(value).map_err(|err| SpriteError::Parse(format!("{key}: {err}")))
}

fn collect_unknown(state: &str, value: &Value, known: &[&str], out: &mut Vec<String>) {
    if let Value::Object(object) = value {
        out.extend(
            object
                .keys()
                .filter(|key| !known.contains(&key.as_str()))
                .map(|key| format!("{state}.{key}")),
        );
    }
}

fn push_scalar(out: &mut Vec<(String, ParamValue)>, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        out.push((name.to_string(), ParamValue::Scalar(value.clone())));
    }
}

fn push_list(out: &mut Vec<(String, ParamValue)>, kind: ListKind, values: &Option<Vec<String>>) {
    if let Some(values) = values {
        out.push((kind.name().to_string(), ParamValue::List(values.clone())));
    }
}

fn present_fields(fields: &[(&str, &Option<String>)]) -> GroupEntry {
    fields
        .iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| (name.to_string(), v.clone())))
        .collect()
}

fn animation_param(key: &str, value: &Value) -> ParamValue {
    if let Value::Array(items) = value {
        if ListKind::from_name(key).is_some() && items.iter().all(is_scalar) {
            return ParamValue::List(items.iter().filter_map(value_text).collect());
        }
        if GroupKind::from_name(key).is_some() && items.iter().all(Value::is_object) {
            let entries = items
                .iter()
                .filter_map(Value::as_object)
                .map(|object| {
                    object
                        .iter()
                        .filter_map(|(field, v)| value_text(v).map(|text| (field.clone(), text)))
                        .collect()
                })
                .collect();
            return ParamValue::Group(entries);
        }
    }
    ParamValue::Scalar(value_text(value).unwrap_or_default())
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Text form of a JSON value; `None` for null.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_text))
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(values.map(|items| items.iter().filter_map(value_text).collect()))
}

#[cfg(test)]
#[path = "tests/document_tests.rs"]
mod tests;
