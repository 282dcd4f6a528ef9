use super::*;
use crate::reconcile::{EntryStatus, Reviewer};

fn row(id: i64, phase: &str, symptoms: &str) -> DisplayRow {
    DisplayRow {
        id: EntryId(id),
        cycle_day: format!("Day {id}"),
        phase: phase.to_string(),
        status: if symptoms == "None" {
            EntryStatus::Pending
        } else {
            EntryStatus::Done
        },
        estrogen_level: "50.00".to_string(),
        progesterone_level: "1.10".to_string(),
        symptoms: symptoms.to_string(),
        reviewer: Reviewer::Unassigned,
    }
}

fn model_with_rows(ids: &[i64]) -> TableModel {
    let mut model = TableModel::default();
    model.install_rows(ids.iter().map(|id| row(*id, "Luteal", "None")).collect());
    model
}

fn order(model: &TableModel) -> Vec<i64> {
    model.filtered_rows().iter().map(|r| r.id.0).collect()
}

#[test]
fn reorder_moves_one_row_and_keeps_the_rest_in_relative_order() {
    let mut model = model_with_rows(&[1, 2, 3, 4, 5]);

    model.reorder(EntryId(2), EntryId(4));
    assert_eq!(order(&model), vec![1, 3, 4, 2, 5]);

    model.reorder(EntryId(5), EntryId(1));
    assert_eq!(order(&model), vec![5, 1, 3, 4, 2]);
}

#[test]
fn reorder_preserves_the_id_multiset() {
    let mut model = model_with_rows(&[1, 2, 3, 4]);
    model.reorder(EntryId(4), EntryId(2));

    let mut ids = order(&model);
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn reorder_with_unknown_ids_is_a_no_op() {
    let mut model = model_with_rows(&[1, 2, 3]);
    model.reorder(EntryId(9), EntryId(2));
    model.reorder(EntryId(1), EntryId(9));
    model.reorder(EntryId(2), EntryId(2));
    assert_eq!(order(&model), vec![1, 2, 3]);
}

#[test]
fn install_rows_discards_manual_order_and_stale_selection() {
    let mut model = model_with_rows(&[1, 2, 3]);
    model.reorder(EntryId(3), EntryId(1));
    model.toggle_selected(EntryId(2));
    model.toggle_selected(EntryId(3));
    assert_eq!(order(&model), vec![3, 1, 2]);

    model.install_rows(vec![row(1, "Luteal", "None"), row(2, "Luteal", "None")]);

    assert_eq!(order(&model), vec![1, 2]);
    assert!(model.is_selected(EntryId(2)));
    assert!(!model.is_selected(EntryId(3)));
    assert_eq!(model.selected_count(), 1);
}

#[test]
fn filters_match_substrings_case_insensitively() {
    let mut model = TableModel::default();
    model.install_rows(vec![
        row(1, "Luteal", "Cramps: 2"),
        row(2, "Follicular", "None"),
        row(3, "Luteal", "Cramps: 4, Mood: 1"),
    ]);

    model.set_filter(Column::Symptoms, "cramps");
    assert_eq!(order(&model), vec![1, 3]);
    assert_eq!(model.filtered_count(), 2);

    model.set_filter(Column::Phase, "FOLLI");
    assert_eq!(model.filtered_count(), 0);

    model.clear_filter(Column::Symptoms);
    assert_eq!(order(&model), vec![2]);

    // Empty needle clears the remaining filter.
    model.set_filter(Column::Phase, "");
    assert_eq!(model.filtered_count(), 3);
}

#[test]
fn sort_applies_columns_in_order_and_is_stable() {
    let mut model = TableModel::default();
    model.install_rows(vec![
        row(1, "Luteal", "None"),
        row(2, "Follicular", "Cramps: 1"),
        row(3, "Luteal", "Cramps: 2"),
        row(4, "Follicular", "None"),
    ]);

    model.set_sort(vec![(Column::Phase, SortDirection::Ascending)]);
    assert_eq!(order(&model), vec![2, 4, 1, 3]);

    model.set_sort(vec![
        (Column::Phase, SortDirection::Ascending),
        (Column::Status, SortDirection::Descending),
    ]);
    // Pending sorts after Done, so Descending puts Pending first.
    assert_eq!(order(&model), vec![4, 2, 1, 3]);

    model.set_sort(Vec::new());
    assert_eq!(order(&model), vec![1, 2, 3, 4]);
}

#[test]
fn pagination_derives_page_count_and_clamps_the_index() {
    let ids: Vec<i64> = (1..=25).collect();
    let mut model = model_with_rows(&ids);

    assert_eq!(model.page_count(), 3);
    assert_eq!(model.page_rows().len(), 10);

    model.set_page(2);
    assert_eq!(model.page_rows().len(), 5);

    model.set_page(99);
    assert_eq!(model.page_index(), 2);

    model.set_page_size(20);
    assert_eq!(model.page_count(), 2);
    assert_eq!(model.page_index(), 1);
    assert_eq!(model.page_rows().len(), 5);
}

#[test]
fn page_size_outside_the_allowed_set_is_ignored() {
    let mut model = model_with_rows(&[1, 2, 3]);
    model.set_page_size(15);
    assert_eq!(model.page_size(), DEFAULT_PAGE_SIZE);

    model.set_page_size(50);
    assert_eq!(model.page_size(), 50);
    assert!(PAGE_SIZES.contains(&model.page_size()));
}

#[test]
fn filtering_shrinks_pages_and_reclamps() {
    let ids: Vec<i64> = (1..=12).collect();
    let mut model = model_with_rows(&ids);
    model.set_page(1);

    model.set_filter(Column::CycleDay, "Day 1");
    // Matches Day 1 and Day 10..12.
    assert_eq!(model.filtered_count(), 4);
    assert_eq!(model.page_count(), 1);
    assert_eq!(model.page_index(), 0);
}

#[test]
fn toggling_visibility_hides_and_restores_columns() {
    let mut model = TableModel::default();
    assert_eq!(model.visible_columns().len(), Column::ALL.len());

    model.toggle_column_visibility(Column::Reviewer);
    assert!(!model.visible_columns().contains(&Column::Reviewer));

    model.toggle_column_visibility(Column::Reviewer);
    assert!(model.visible_columns().contains(&Column::Reviewer));
}

#[test]
fn selection_replacement_and_toggling() {
    let mut model = model_with_rows(&[1, 2, 3]);

    model.set_selection([EntryId(1), EntryId(3)].into_iter().collect());
    assert_eq!(model.selected_count(), 2);

    model.toggle_selected(EntryId(1));
    assert!(!model.is_selected(EntryId(1)));
    assert_eq!(model.selected_count(), 1);
}
