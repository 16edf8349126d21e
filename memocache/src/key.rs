//! Cache key derivation.
use crate::config::MethodOptions;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct KeyRecord<'a> {
    method: &'a str,
    args: &'a [Value],
}

/// Converts call arguments into their positional JSON values.
///
/// Arguments are expected as a tuple: `(a, b)` gives two positions, `(a,)`
/// one, and `()` none. Any other value counts as a single argument.
pub fn arguments<A>(args: &A) -> Result<Vec<Value>, serde_json::Error>
where
    A: Serialize + ?Sized,
{
    Ok(match serde_json::to_value(args)? {
        Value::Array(values) => values,
        Value::Null => Vec::new(),
        value => vec![value],
    })
}

/// Computes the cache key of a call to `method` with `args`.
///
/// With a custom key function its result is used as is. Otherwise the key is
/// the compact JSON of `{"method": method, "args": args}`, so structurally
/// equal arguments in the same order always share a key.
pub fn cache_key(
    method: &str,
    args: &[Value],
    options: &MethodOptions,
) -> Result<String, serde_json::Error> {
    match &options.key {
        Some(key) => Ok(key(args)),
        None => serde_json::to_string(&KeyRecord { method, args }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn default_key<A: Serialize>(method: &str, args: &A) -> String {
        let args = arguments(args).expect("failed to serialize arguments");
        cache_key(method, &args, &MethodOptions::default()).expect("failed to build key")
    }

    #[test]
    fn positional_arguments() {
        assert_eq!(arguments(&(2, 3)).expect("arguments"), vec![json!(2), json!(3)]);
        assert_eq!(arguments(&("a",)).expect("arguments"), vec![json!("a")]);
        assert_eq!(arguments(&()).expect("arguments"), Vec::<Value>::new());
        assert_eq!(arguments(&42).expect("arguments"), vec![json!(42)]);
        assert_eq!(arguments(&((),)).expect("arguments"), vec![Value::Null]);
        assert_eq!(arguments(&(vec![1, 2],)).expect("arguments"), vec![json!([1, 2])]);
    }

    #[test]
    fn default_format() {
        assert_eq!(default_key("add", &(2, 3)), r#"{"method":"add","args":[2,3]}"#);
        assert_eq!(default_key("nothing", &()), r#"{"method":"nothing","args":[]}"#);
        assert_eq!(
            default_key("find", &(json!({"a": 1, "b": [true, null]}),)),
            r#"{"method":"find","args":[{"a":1,"b":[true,null]}]}"#
        );
    }

    #[test]
    fn structural_equality() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        assert_eq!(
            default_key("dist", &(Point { x: 1, y: 2 }, Point { x: 3, y: 4 })),
            default_key("dist", &(Point { x: 1, y: 2 }, Point { x: 3, y: 4 }))
        );
        assert_ne!(
            default_key("dist", &(Point { x: 1, y: 2 },)),
            default_key("dist", &(Point { x: 2, y: 1 },))
        );
        let a: HashMap<&str, i32> = [("x", 1), ("y", 2), ("z", 3)].into_iter().collect();
        let b: HashMap<&str, i32> = [("z", 3), ("y", 2), ("x", 1)].into_iter().collect();
        assert_eq!(default_key("map", &(a,)), default_key("map", &(b,)));
    }

    #[test]
    fn order_and_method_matter() {
        assert_ne!(default_key("add", &(2, 3)), default_key("add", &(3, 2)));
        assert_ne!(default_key("add", &(2, 3)), default_key("sub", &(2, 3)));
    }

    #[test]
    fn custom_key() {
        let options = MethodOptions::new()
            .key(|args| format!("{}+{}", args[0]["a"], args[1]["b"]));
        let first = arguments(&(json!({"a": 2, "b": 4}), json!({"a": 3, "b": 5})))
            .expect("failed to serialize arguments");
        let second = arguments(&(json!({"a": 2, "b": 5}), json!({"a": 9, "b": 5})))
            .expect("failed to serialize arguments");
        assert_eq!(cache_key("add", &first, &options).expect("failed to build key"), "2+5");
        assert_eq!(cache_key("add", &second, &options).expect("failed to build key"), "2+5");
    }
}
