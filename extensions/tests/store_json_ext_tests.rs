#[cfg(test)]
mod tests {
    use kaban::traits::StoreReader;
    use kaban::{KabanError, TypedStore};
    use kaban_extensions::StoreJsonExt;
    use serde_json::json;

    #[test]
    fn test_store_json_scalars_and_arrays() {
        let store = TypedStore::new();

        store.store_json("s", &json!("hello")).unwrap();
        store.store_json("i", &json!(-5)).unwrap();
        store.store_json("u", &json!(u64::MAX)).unwrap();
        store.store_json("f", &json!(2.5)).unwrap();
        store.store_json("b", &json!(true)).unwrap();
        store.store_json("n", &json!(null)).unwrap();
        store.store_json("tags", &json!(["x", "y"])).unwrap();

        assert_eq!(store.load_string("s").unwrap().as_deref(), Some("hello"));
        assert_eq!(store.load_i64("i").unwrap(), Some(-5));
        assert_eq!(store.load_u64("u").unwrap(), Some(u64::MAX));
        assert_eq!(store.load_f64("f").unwrap(), Some(2.5));
        assert_eq!(store.load_bool("b").unwrap(), Some(true));
        assert_eq!(store.load_string("n").unwrap(), None);
        assert_eq!(
            store.load_strings("tags").unwrap(),
            Some(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn test_store_json_rejects_objects_and_mixed_arrays() {
        let store = TypedStore::new();

        assert!(matches!(
            store.store_json("o", &json!({"a": 1})),
            Err(KabanError::UnsupportedType(_))
        ));
        assert!(matches!(
            store.store_json("m", &json!([1, "two"])),
            Err(KabanError::UnsupportedType(_))
        ));
        assert!(!store.exists("o").unwrap());
    }

    #[test]
    fn test_import_json_object() {
        let store = TypedStore::new();
        let stored = store
            .import_json_object(r#"{"name":"kaban","ids":[3,1,2],"ok":false}"#)
            .unwrap();

        assert_eq!(stored, 3);
        assert_eq!(store.keys().unwrap(), vec!["ids", "name", "ok"]);
        assert_eq!(store.load_ints("ids").unwrap(), Some(vec![3, 1, 2]));
        assert_eq!(
            store.to_json().unwrap(),
            r#"{"ids":[3,1,2],"name":"kaban","ok":false}"#
        );
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let store = TypedStore::new();
        let result = store.import_json_object(r#"{"good":1,"bad":{"nested":true}}"#);

        assert!(matches!(result, Err(KabanError::UnsupportedType(_))));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_import_rejects_non_object() {
        let store = TypedStore::new();
        assert!(matches!(
            store.import_json_object("[1,2,3]"),
            Err(KabanError::Json(_))
        ));
    }
}
