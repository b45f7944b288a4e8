#[cfg(test)]
mod tests {
    use kaban::KabanError;
    use kaban_extensions::JsonDictionary;
    use serde::{Deserialize, Serialize};
    use std::sync::Arc;
    use std::thread;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        age: u32,
    }

    #[test]
    fn test_store_and_load_struct() {
        let dict = JsonDictionary::new();
        let profile = Profile {
            name: "alice".into(),
            age: 30,
        };

        dict.store("profile", &profile).unwrap();
        let loaded: Profile = dict.load("profile").unwrap();

        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_empty_and_missing_keys() {
        let dict = JsonDictionary::new();

        assert!(matches!(dict.store("", &1), Err(KabanError::InvalidKey)));
        assert!(matches!(
            dict.load::<i32>("missing"),
            Err(KabanError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_load_into_wrong_type_fails() {
        let dict = JsonDictionary::new();
        dict.store("n", "not a number").unwrap();

        assert!(matches!(dict.load::<u32>("n"), Err(KabanError::Json(_))));
    }

    #[test]
    fn test_delete() {
        let dict = JsonDictionary::new();
        dict.store("a", &1).unwrap();

        assert!(dict.delete("a").unwrap());
        assert!(!dict.delete("a").unwrap());
        assert!(dict.is_empty());
    }

    #[test]
    fn test_store_all_and_sorted_keys() {
        let dict = JsonDictionary::new();
        let stored = dict
            .store_all([("c", 3), ("a", 1), ("b", 2)])
            .unwrap();

        assert_eq!(stored, 3);
        assert_eq!(dict.keys(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_overwrites() {
        let left = JsonDictionary::new();
        left.store("shared", "left").unwrap();
        left.store("only_left", &true).unwrap();

        let right = JsonDictionary::new();
        right.store("shared", "right").unwrap();
        right.store("only_right", &[1, 2]).unwrap();

        left.merge(&right);

        assert_eq!(left.len(), 3);
        assert_eq!(left.load::<String>("shared").unwrap(), "right");
        assert_eq!(right.len(), 2);
    }

    #[test]
    fn test_to_json_is_sorted_and_escaped() {
        let dict = JsonDictionary::new();
        dict.store("z", &1).unwrap();
        dict.store("a\"b", "x").unwrap();

        assert_eq!(dict.to_json().unwrap(), r#"{"a\"b":"x","z":1}"#);
        assert_eq!(dict.to_string(), dict.to_json().unwrap());
    }

    #[test]
    fn test_from_json_round_trip() {
        let json = r#"{"list":[1,2,3],"name":"kaban","nested":{"k":null}}"#;
        let dict = JsonDictionary::from_json(json).unwrap();

        assert_eq!(dict.keys(), vec!["list", "name", "nested"]);
        assert_eq!(dict.load::<Vec<u8>>("list").unwrap(), vec![1, 2, 3]);
        assert_eq!(dict.to_json().unwrap(), json);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(
            JsonDictionary::from_json("[1, 2]"),
            Err(KabanError::Json(_))
        ));
    }

    #[test]
    fn test_concurrent_stores() {
        let dict = Arc::new(JsonDictionary::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let dict = Arc::clone(&dict);
                thread::spawn(move || {
                    for i in 0..100 {
                        dict.store(&format!("t{t}-{i}"), &i).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(dict.len(), 800);
        assert_eq!(dict.load::<i32>("t7-99").unwrap(), 99);
    }
}
