use kaban::Value;
use kaban::codec::parse_time;
use std::str::FromStr;

/// One `key[:kind]=value` argument, parsed into a typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub key: String,
    pub value: Value,
}

/// Parses `key=value`, `key:kind=value` or `key:null`.
///
/// Kinds: `str`, `int`, `uint`, `float`, `f32`, `bool`, `time`, `null`,
/// `strs`, `ints`, `uints`, `json`. Without a kind the value is a string.
/// Slice kinds take comma-separated elements; an empty right side is an
/// empty slice.
pub fn parse_assignment(input: &str) -> Result<Assignment, String> {
    let (target, raw) = match input.split_once('=') {
        Some((target, raw)) => (target, Some(raw)),
        None => (input, None),
    };

    let (key, kind) = match target.rsplit_once(':') {
        Some((key, kind)) => (key, kind),
        None => (target, "str"),
    };

    if key.is_empty() {
        return Err(format!("Missing key in '{input}'"));
    }

    let value = match (kind, raw) {
        ("null", None | Some("")) => Value::Null,
        ("null", Some(_)) => return Err(format!("'{key}:null' takes no value")),
        (_, None) => return Err(format!("Missing '=' in '{input}'")),
        (kind, Some(raw)) => parse_value(kind, raw)
            .map_err(|err| format!("Invalid {kind} value for '{key}': {err}"))?,
    };

    Ok(Assignment {
        key: key.to_string(),
        value,
    })
}

fn parse_value(kind: &str, raw: &str) -> Result<Value, String> {
    let value = match kind {
        "str" | "string" => Value::from(raw),
        "int" => Value::Int(parse(raw)?),
        "uint" => Value::Uint(parse(raw)?),
        "float" | "f64" => Value::Float64(parse(raw)?),
        "f32" => Value::Float32(parse(raw)?),
        "bool" => Value::Bool(parse_bool(raw)?),
        "time" => Value::Time(parse_time(raw).map_err(|e| e.to_string())?),
        "strs" => Value::Strings(split(raw).map(str::to_string).collect()),
        "ints" => Value::Ints(split(raw).map(parse::<i64>).collect::<Result<_, _>>()?),
        "uints" => Value::Uints(split(raw).map(parse::<u64>).collect::<Result<_, _>>()?),
        "json" => {
            let json: serde_json::Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
            Value::try_from(json).map_err(|e| e.to_string())?
        }
        other => {
            return Err(format!(
                "unknown kind '{other}' (a key containing ':' needs an explicit kind, e.g. key:str=value)"
            ));
        }
    };

    Ok(value)
}

fn parse<T>(raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| e.to_string())
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" => Ok(true),
        "false" | "f" | "0" | "no" => Ok(false),
        other => Err(format!("'{other}' is not a boolean")),
    }
}

fn split(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').filter(|_| !raw.is_empty())
}
