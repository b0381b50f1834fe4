use categorical_expander::dataset::{Category, Column, DataFrame};
use categorical_expander::preprocessing::{
    CategoricalExpander, ErrorKind, ExpanderConfig, FittedCategoricalExpander, FittedTransformer,
    PreprocessingError, Transformer,
};

fn train_frame() -> DataFrame {
    DataFrame::new(vec![
        Column::new("id", vec![100i64, 101, 102, 103, 104]),
        Column::new("color", vec!["red", "blue", "red", "green", "blue"]),
        Column::new("size", vec![3i64, 1, 2, 3, 1]),
        Column::new("in_stock", vec![true, false, true, true, false]),
        Column::new("price", vec![9.5, 3.0, 4.25, 7.0, 3.0]),
    ])
    .unwrap()
    .with_index(vec![40, 41, 42, 43, 44])
    .unwrap()
}

fn int8(df: &DataFrame, name: &str) -> Vec<i8> {
    df.column(name)
        .unwrap_or_else(|| panic!("missing column {}", name))
        .data()
        .as_i8()
        .unwrap()
        .to_vec()
}

#[test]
fn expands_mixed_dtypes_in_configured_order() {
    let expander = CategoricalExpander::new(["size", "color", "in_stock"]).unwrap();
    let fitted = expander.fit(&train_frame()).unwrap();

    let out = fitted.transform(&train_frame()).unwrap();
    assert_eq!(
        out.column_names(),
        vec![
            "id",
            "price",
            "size_1",
            "size_2",
            "size_3",
            "color_blue",
            "color_green",
            "color_red",
            "in_stock_false",
            "in_stock_true",
        ]
    );
    assert_eq!(out.height(), 5);
    assert_eq!(out.index(), &[40, 41, 42, 43, 44]);
    assert_eq!(int8(&out, "size_3"), vec![1, 0, 0, 1, 0]);
    assert_eq!(int8(&out, "in_stock_true"), vec![1, 0, 1, 1, 0]);
}

#[test]
fn every_row_has_one_indicator_per_column() {
    let fitted = CategoricalExpander::new(["color", "size"])
        .unwrap()
        .fit(&train_frame())
        .unwrap();
    let out = fitted.transform(&train_frame()).unwrap();

    for row in 0..out.height() {
        let active: i32 = fitted
            .feature_names_out()
            .iter()
            .map(|name| i32::from(int8(&out, name)[row]))
            .sum();
        assert_eq!(active, 2, "row {}", row);
    }
}

#[test]
fn drop_first_removes_smallest_category() {
    let config = ExpanderConfig::new(["color", "size"]).with_drop_first(true);
    let fitted = CategoricalExpander::from_config(config)
        .unwrap()
        .fit(&train_frame())
        .unwrap();

    assert_eq!(
        fitted.feature_names_out(),
        &["color_green", "color_red", "size_2", "size_3"]
    );
    assert_eq!(
        fitted.categories("color").unwrap()[0],
        Category::from("blue")
    );
}

#[test]
fn unseen_rows_and_extra_columns() {
    let fitted = CategoricalExpander::new(["color"])
        .unwrap()
        .fit(&train_frame())
        .unwrap();

    let test = DataFrame::new(vec![
        Column::new("note", vec!["a", "b", "c"]),
        Column::new("color", vec!["teal", "green", "red"]),
    ])
    .unwrap()
    .with_index(vec![9, 8, 7])
    .unwrap();

    let out = fitted.transform(&test).unwrap();
    assert_eq!(out.index(), &[9, 8, 7]);
    assert_eq!(out.column("note"), test.column("note"));
    assert_eq!(int8(&out, "color_blue"), vec![0, 0, 0]);
    assert_eq!(int8(&out, "color_green"), vec![0, 1, 0]);
    assert_eq!(int8(&out, "color_red"), vec![0, 0, 1]);
}

#[test]
fn integer_width_may_change_between_fit_and_transform() {
    let fitted = CategoricalExpander::new(["size"])
        .unwrap()
        .fit(&train_frame())
        .unwrap();
    let test = DataFrame::new(vec![Column::new("size", vec![2i8, 3])]).unwrap();

    let out = fitted.transform(&test).unwrap();
    assert_eq!(int8(&out, "size_2"), vec![1, 0]);
}

#[test]
fn type_change_is_a_schema_error() {
    let fitted = CategoricalExpander::new(["size"])
        .unwrap()
        .fit(&train_frame())
        .unwrap();
    let test = DataFrame::new(vec![Column::new("size", vec!["2", "3"])]).unwrap();

    let err = fitted.transform(&test).unwrap_err();
    assert!(matches!(err, PreprocessingError::DtypeMismatch { .. }));
    assert_eq!(err.kind(), ErrorKind::Schema);
}

#[test]
fn fit_transform_matches_fit_then_transform() {
    let expander = CategoricalExpander::new(["color"]).unwrap();
    let once = expander.fit_transform(&train_frame()).unwrap();
    let twice = expander
        .fit(&train_frame())
        .unwrap()
        .transform(&train_frame())
        .unwrap();
    assert_eq!(once, twice);
}

#[test]
fn degenerate_column_reports_name() {
    let data = DataFrame::new(vec![
        Column::new("color", vec!["red", "blue"]),
        Column::new("region", vec!["eu", "eu"]),
    ])
    .unwrap();

    let err = CategoricalExpander::new(["color", "region"])
        .unwrap()
        .fit(&data)
        .unwrap_err();
    assert!(err.to_string().contains("`region`"));
    assert_eq!(err.kind(), ErrorKind::DegenerateColumn);
}

#[test]
fn save_and_load_fitted_expander() {
    let config = ExpanderConfig::new(["color", "size"])
        .with_prefixes(["c", "s"])
        .with_prefix_sep(":")
        .with_drop_first(true);
    let fitted = CategoricalExpander::from_config(config)
        .unwrap()
        .fit(&train_frame())
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expander.bin");
    fitted.save_to_file(&path).unwrap();

    let loaded = FittedCategoricalExpander::load_from_file(&path).unwrap();
    assert_eq!(loaded.config(), fitted.config());
    assert_eq!(loaded.feature_names_out(), fitted.feature_names_out());
    assert_eq!(loaded.categories_all(), fitted.categories_all());
    assert_eq!(
        loaded.transform(&train_frame()).unwrap(),
        fitted.transform(&train_frame()).unwrap()
    );
}

#[test]
fn load_from_corrupt_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.bin");
    std::fs::write(&path, [0xffu8, 0x00, 0x13]).unwrap();

    let err = FittedCategoricalExpander::load_from_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);
}

#[test]
fn config_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expander.json");
    std::fs::write(
        &path,
        r#"{"columns": ["color"], "prefix": {"shared": "colour"}, "drop_first": true}"#,
    )
    .unwrap();

    let config = ExpanderConfig::load_json(&path).unwrap();
    let fitted = CategoricalExpander::from_config(config)
        .unwrap()
        .fit(&train_frame())
        .unwrap();
    assert_eq!(
        fitted.feature_names_out(),
        &["colour_green", "colour_red"]
    );
}

#[test]
fn inverse_restores_encoded_columns_after_passthrough() {
    let fitted = CategoricalExpander::new(["color", "in_stock"])
        .unwrap()
        .fit(&train_frame())
        .unwrap();
    let out = fitted.transform(&train_frame()).unwrap();
    let restored = fitted.inverse_transform(&out).unwrap();

    assert_eq!(
        restored.column_names(),
        vec!["id", "size", "price", "color", "in_stock"]
    );
    assert_eq!(restored.index(), train_frame().index());
    assert_eq!(restored.column("color"), train_frame().column("color"));
    assert_eq!(restored.column("in_stock"), train_frame().column("in_stock"));
}
