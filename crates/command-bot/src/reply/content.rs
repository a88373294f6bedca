//! Classification and normalization of command reply content.

use discord_client::OutgoingMessage;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Number, Value};

/// What a command handed to `reply`, classified once at the call boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyInput {
    /// A string, number or boolean, already rendered as text.
    Primitive(String),
    /// A message payload with content, embeds or a file.
    Structured(OutgoingMessage),
    /// Any other object or array. Sent as a JSON code block.
    Raw(Value),
}

impl ReplyInput {
    /// Classify an arbitrary JSON value.
    ///
    /// Objects count as messages only when `content`, `embeds` or `file` is
    /// truthy in the JavaScript sense: `""`, `0`, `false` and `null` do not
    /// count, so `{"content": ""}` is dumped rather than sent empty. A message
    /// object is carried through unchanged, whatever shape its fields have.
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                if object_has_data(&map) {
                    Self::Structured(OutgoingMessage::from_object(map))
                } else {
                    Self::Raw(Value::Object(map))
                }
            }
            Value::Array(_) => Self::Raw(value),
            Value::String(text) => Self::Primitive(text),
            Value::Bool(b) => Self::Primitive(b.to_string()),
            Value::Number(n) => Self::Primitive(number_text(&n)),
            Value::Null => Self::Primitive("null".into()),
        }
    }
}

impl From<Value> for ReplyInput {
    fn from(value: Value) -> Self {
        Self::classify(value)
    }
}

impl From<OutgoingMessage> for ReplyInput {
    fn from(message: OutgoingMessage) -> Self {
        if message_has_data(&message) {
            Self::Structured(message)
        } else {
            Self::Raw(authored_value(&message))
        }
    }
}

impl From<&str> for ReplyInput {
    fn from(text: &str) -> Self {
        Self::Primitive(text.to_string())
    }
}

impl From<String> for ReplyInput {
    fn from(text: String) -> Self {
        Self::Primitive(text)
    }
}

impl From<bool> for ReplyInput {
    fn from(b: bool) -> Self {
        Self::Primitive(b.to_string())
    }
}

impl From<f64> for ReplyInput {
    fn from(n: f64) -> Self {
        Self::Primitive(float_text(n))
    }
}

macro_rules! integer_reply_input {
    ($($t:ty),+) => {$(
        impl From<$t> for ReplyInput {
            fn from(n: $t) -> Self {
                Self::Primitive(n.to_string())
            }
        }
    )+};
}

integer_reply_input!(i32, i64, u32, u64, usize);

/// Turn classified reply input into a message payload.
///
/// Never fails: payload problems surface when the platform rejects the send.
pub fn normalize(input: ReplyInput) -> OutgoingMessage {
    match input {
        ReplyInput::Primitive(text) => OutgoingMessage::text(text),
        ReplyInput::Structured(message) => message,
        ReplyInput::Raw(value) => {
            OutgoingMessage::text(format!("```json\n{}\n```", pretty_json(&value)))
        }
    }
}

fn object_has_data(map: &Map<String, Value>) -> bool {
    ["content", "embeds", "file"]
        .iter()
        .any(|key| map.get(*key).is_some_and(is_truthy))
}

fn message_has_data(message: &OutgoingMessage) -> bool {
    message.content.as_deref().is_some_and(|c| !c.is_empty())
        || message.embeds.is_some()
        || message.file.is_some()
        || object_has_data(&message.extra)
}

/// A typed payload spelled the way handlers write it: camelCase addressing
/// keys, with the file included.
fn authored_value(message: &OutgoingMessage) -> Value {
    let mut object = Map::new();

    if let Some(content) = &message.content {
        object.insert("content".into(), Value::String(content.clone()));
    }
    if let Some(embeds) = message.embeds.as_ref().and_then(|e| serde_json::to_value(e).ok()) {
        object.insert("embeds".into(), embeds);
    }
    if let Some(file) = message.file.as_ref().and_then(|f| serde_json::to_value(f).ok()) {
        object.insert("file".into(), file);
    }
    if let Some(reference) = &message.message_reference {
        let value = match reference {
            Some(reference) => {
                let mut inner = Map::new();
                inner.insert(
                    "messageId".into(),
                    Value::String(reference.message_id.to_string()),
                );
                Value::Object(inner)
            }
            None => Value::Null,
        };
        object.insert("messageReference".into(), value);
    }
    if let Some(mentions) = &message.allowed_mentions {
        let mut inner = Map::new();
        inner.insert("repliedUser".into(), Value::Bool(mentions.replied_user));
        object.insert("allowedMentions".into(), Value::Object(inner));
    }

    object.extend(message.extra.clone());
    Value::Object(object)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        float_text(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Render a float the way JavaScript's `Number#toString` does: integral
/// values without a fraction, exponent notation outside `[1e-6, 1e21)`.
pub fn float_text(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }
    if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        return format!("{}Infinity", sign);
    }
    if n == 0.0 {
        return "0".into();
    }

    if (1e-6..1e21).contains(&n.abs()) {
        return n.to_string();
    }

    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

fn pretty_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use discord_client::{AllowedMentions, Attachment, Embed, MessageId, MessageReference};
    use serde_json::json;

    fn fenced(value: &Value) -> String {
        format!("```json\n{}\n```", pretty_json(value))
    }

    fn content_of(input: impl Into<ReplyInput>) -> String {
        normalize(input.into()).content.unwrap_or_default()
    }

    #[test]
    fn test_primitives_become_text() {
        assert_eq!(normalize("hello".into()), OutgoingMessage::text("hello"));
        assert_eq!(content_of(42i64), "42");
        assert_eq!(content_of(true), "true");
        assert_eq!(content_of(false), "false");
        assert_eq!(content_of(1.5), "1.5");
        assert_eq!(content_of(3.0), "3");
        assert_eq!(content_of(json!("from json")), "from json");
        assert_eq!(content_of(json!(-7)), "-7");
        assert_eq!(content_of(json!(2.0)), "2");
    }

    #[test]
    fn test_object_without_data_is_dumped() {
        let input = json!({ "foo": 1 });
        assert_eq!(content_of(input), "```json\n{\n    \"foo\": 1\n}\n```");
    }

    #[test]
    fn test_dump_preserves_key_order_and_is_recoverable() {
        let input = json!({ "zeta": [1, 2], "alpha": { "nested": null }, "mid": "x" });
        let content = content_of(input.clone());

        let inner = content
            .strip_prefix("```json\n")
            .and_then(|s| s.strip_suffix("\n```"))
            .unwrap();
        assert_eq!(inner, pretty_json(&input));
        assert!(inner.find("zeta").unwrap() < inner.find("alpha").unwrap());
        assert_eq!(serde_json::from_str::<Value>(inner).unwrap(), input);
    }

    #[test]
    fn test_arrays_are_dumped() {
        let input = json!([1, "two", { "content": "not a message" }]);
        assert_eq!(content_of(input.clone()), fenced(&input));
        assert_eq!(content_of(json!([])), "```json\n[]\n```");
    }

    #[test]
    fn test_falsy_content_is_dumped() {
        for input in [
            json!({ "content": "" }),
            json!({ "content": 0 }),
            json!({ "content": false }),
            json!({ "content": null }),
            json!({ "content": "", "embeds": null, "file": null }),
        ] {
            assert_eq!(content_of(input.clone()), fenced(&input));
        }
    }

    #[test]
    fn test_truthy_fields_pass_through() {
        let input = json!({
            "content": "hi",
            "embeds": [{ "title": "card" }],
            "tts": true
        });

        let message = normalize(ReplyInput::classify(input.clone()));
        assert_eq!(message.content.as_deref(), Some("hi"));
        assert_eq!(message.embeds.as_ref().map(Vec::len), Some(1));
        assert_eq!(serde_json::to_value(&message).unwrap(), input);
    }

    #[test]
    fn test_empty_embeds_array_counts_as_data() {
        let message = normalize(ReplyInput::classify(json!({ "embeds": [] })));
        assert_eq!(message.content, None);
        assert_eq!(message.embeds, Some(Vec::new()));
    }

    #[test]
    fn test_explicit_null_reference_survives_passthrough() {
        let message = normalize(ReplyInput::classify(json!({
            "content": "quiet",
            "messageReference": null
        })));
        assert_eq!(message.message_reference, Some(None));
    }

    #[test]
    fn test_message_objects_pass_through_unchanged() {
        let inputs = [
            json!({ "content": "hi", "embeds": [{ "title": "t", "color": "#ff0000" }] }),
            json!({ "content": "see file", "file": { "file": "raw", "name": "a.txt" } }),
            json!({ "content": 5 }),
            json!({ "embeds": "not a list", "nonce": [1, 2] }),
        ];

        for input in inputs {
            let message = normalize(ReplyInput::classify(input.clone()));
            assert_eq!(serde_json::to_value(&message).unwrap(), input);
        }
    }

    #[test]
    fn test_untyped_embed_keeps_content() {
        let message = normalize(ReplyInput::classify(json!({
            "content": "hi",
            "embeds": [{ "title": "t", "color": "#ff0000" }]
        })));

        assert_eq!(message.content.as_deref(), Some("hi"));
        assert_eq!(
            message.extra.get("embeds"),
            Some(&json!([{ "title": "t", "color": "#ff0000" }]))
        );
    }

    #[test]
    fn test_typed_payload_passes_through() {
        let message = OutgoingMessage {
            content: Some("hi".into()),
            embeds: Some(vec![Embed {
                title: Some("card".into()),
                ..Default::default()
            }]),
            message_reference: Some(Some(MessageReference {
                message_id: MessageId(5),
            })),
            ..Default::default()
        };
        assert_eq!(normalize(message.clone().into()), message);

        let upload = OutgoingMessage {
            file: Some(Attachment {
                name: "a.txt".into(),
                data: b"a".to_vec(),
            }),
            ..Default::default()
        };
        assert_eq!(normalize(upload.clone().into()), upload);
    }

    #[test]
    fn test_typed_payload_with_empty_content_is_dumped() {
        let message = OutgoingMessage {
            content: Some(String::new()),
            message_reference: Some(None),
            ..Default::default()
        };

        assert_eq!(
            content_of(message),
            "```json\n{\n    \"content\": \"\",\n    \"messageReference\": null\n}\n```"
        );
    }

    #[test]
    fn test_typed_payload_dump_uses_handler_spelling() {
        let message = OutgoingMessage {
            message_reference: Some(Some(MessageReference {
                message_id: MessageId(5),
            })),
            allowed_mentions: Some(AllowedMentions { replied_user: true }),
            ..Default::default()
        };

        assert_eq!(
            authored_value(&message),
            json!({
                "messageReference": { "messageId": "5" },
                "allowedMentions": { "repliedUser": true }
            })
        );
    }

    #[test]
    fn test_typed_payload_with_raw_extra_content_is_sent() {
        let mut message = OutgoingMessage::default();
        message.extra.insert("content".into(), json!(7));

        assert_eq!(normalize(message.clone().into()), message);
    }

    #[test]
    fn test_float_text() {
        assert_eq!(float_text(0.1), "0.1");
        assert_eq!(float_text(-0.0), "0");
        assert_eq!(float_text(3.0), "3");
        assert_eq!(float_text(1e20), "100000000000000000000");
        assert_eq!(float_text(1e21), "1e+21");
        assert_eq!(float_text(-2.5e30), "-2.5e+30");
        assert_eq!(float_text(1e-6), "0.000001");
        assert_eq!(float_text(1e-7), "1e-7");
        assert_eq!(float_text(1.5e-7), "1.5e-7");
        assert_eq!(float_text(f64::INFINITY), "Infinity");
        assert_eq!(float_text(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(float_text(f64::NAN), "NaN");
    }

    #[test]
    fn test_json_numbers_use_float_text() {
        assert_eq!(content_of(json!(1e21)), "1e+21");
        assert_eq!(content_of(json!(0.0000001)), "1e-7");
    }
}
