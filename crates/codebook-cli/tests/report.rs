//! Tests for codebook table and JSON rendering.

use codebook_cli::report::{
    groups_table, item_table, options_json, options_table, render_options, summary_table,
};
use codebook_core::CodebookAccessor;
use codebook_model::{Codebook, DataTable, Group, Item, OptionSet};

fn accessor() -> CodebookAccessor {
    let codebook = Codebook::new(vec![
        Group::new("g1", "How old are you?").with_item("v_1", Item::new("Age", "numeric")),
        Group::new("g2", "Do you smoke?")
            .with_options([("1", "Yes"), ("2", "No")].into_iter().collect())
            .with_item("v_2", Item::new("Cigarettes", "categorical"))
            .with_item(
                "v_3",
                Item::new("Cigars", "categorical")
                    .with_options([("1", "Daily"), ("2", "Weekly"), ("3", "Never")].into_iter().collect()),
            ),
    ]);
    CodebookAccessor::new(codebook, DataTable::default())
}

fn column(table: &comfy_table::Table, index: usize) -> Vec<String> {
    table
        .row_iter()
        .filter_map(|row| row.cell_iter().nth(index).map(comfy_table::Cell::content))
        .collect()
}

#[test]
fn groups_table_lists_groups_in_order() {
    let table = groups_table(&accessor());
    assert_eq!(column(&table, 0), vec!["g1", "g2"]);
    assert_eq!(column(&table, 1), vec!["How old are you?", "Do you smoke?"]);
    assert_eq!(column(&table, 2), vec!["1", "2"]);
}

#[test]
fn item_table_reports_option_source() {
    let accessor = accessor();
    let table = item_table(&accessor, "v_2").expect("item table");
    let values = column(&table, 1);
    assert_eq!(values[0], "v_2");
    assert_eq!(values[1], "Cigarettes");
    assert_eq!(values[3], "g2");
    assert_eq!(values[4], "Do you smoke?");
    assert_eq!(values[5], "group");
    assert_eq!(values[6], "1 = Yes\n2 = No");

    let table = item_table(&accessor, "v_3").expect("item table");
    assert_eq!(column(&table, 1)[5], "item");

    let table = item_table(&accessor, "v_1").expect("item table");
    assert_eq!(column(&table, 1)[5], "-");
}

#[test]
fn item_table_rejects_unknown_encoding() {
    assert!(item_table(&accessor(), "v_404").is_err());
}

#[test]
fn options_table_has_one_row_per_option() {
    let accessor = accessor();
    let table = options_table(accessor.item_options("v_3").expect("options"));
    assert_eq!(column(&table, 0), vec!["1", "2", "3"]);
    assert_eq!(column(&table, 1), vec!["Daily", "Weekly", "Never"]);
}

#[test]
fn summary_table_covers_every_encoding() {
    let table = summary_table(&accessor()).expect("summary table");
    assert_eq!(column(&table, 0), vec!["v_1", "v_2", "v_3"]);
    assert_eq!(column(&table, 3), vec!["g1", "g2", "g2"]);
    assert_eq!(column(&table, 4), vec!["0", "2", "3"]);
}

#[test]
fn options_json_snapshot() {
    let accessor = accessor();
    let json = options_json(accessor.item_options("v_2").unwrap()).expect("options json");
    insta::assert_snapshot!(json, @r#"
    {
      "1": "Yes",
      "2": "No"
    }
    "#);
    insta::assert_snapshot!(options_json(&OptionSet::new()).expect("options json"), @"{}");
}

#[test]
fn options_render_in_file_order() {
    let options: OptionSet = [("1", "Never"), ("2", "Sometimes"), ("10", "Always"), ("-1", "No answer")]
        .into_iter()
        .collect();
    assert_eq!(column(&options_table(&options), 0), vec!["1", "2", "10", "-1"]);
    insta::assert_snapshot!(options_json(&options).expect("options json"), @r#"
    {
      "1": "Never",
      "2": "Sometimes",
      "10": "Always",
      "-1": "No answer"
    }
    "#);
}

#[test]
fn empty_options_render_as_dash() {
    let accessor = accessor();
    assert_eq!(render_options(accessor.item_options("v_1").unwrap()), "-");
    let rendered = render_options(accessor.item_options("v_3").unwrap());
    assert!(rendered.contains("Weekly"), "{rendered}");
}
