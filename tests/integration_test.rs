use std::path::Path;

use assert_approx_eq::assert_approx_eq;
use tempfile::TempDir;

use region_explorer::{
    analysis::{
        find_row_by_key, find_rows_by_predicate, find_year_column, max_by_value, min_by_value,
        region_mean, row_mean, row_sum, Explorer,
    },
    config::ExplorerConfig,
    error::ExplorerError,
    io::{read_table, write_table, WriteMode},
    models::{Cell, Extreme, KeyValue, Table},
};

fn write_file(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

/// Country, species and population tables for three sub-regions, in a temp dir.
fn create_test_data() -> (TempDir, Explorer) {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "Country_Data.csv",
        "Country,UN Region,UN Sub-Region,Sq Km\n\
         Kenya,Africa,Eastern Africa,569140\n\
         Uganda,Africa,Eastern Africa,200520\n\
         Rwanda,Africa,Eastern Africa,24670\n\
         Chile,Americas,South America,743532\n\
         Atlantis,Ocean,Lost Lands,0\n",
    );
    write_file(
        dir.path(),
        "Threatened_Species.csv",
        "Country,Mammals,Birds,Fish,Plants\n\
         Kenya,10,20,30,40\n\
         Uganda,0,0,0,0\n\
         Rwanda,5,5,5,5\n\
         Chile,24,36,30,81\n\
         Atlantis,1,1,1,1\n",
    );
    write_file(
        dir.path(),
        "Population_Data.csv",
        "Country,2020 Pop,2010 Pop,2000 Pop\n\
         Kenya,53771000,42617500,31464000\n\
         Uganda,45741000,34695500,23650000\n\
         Rwanda,12952000,10531000,8110000\n\
         Chile,19116000,17229000,15342000\n\
         Atlantis,10,20,30\n",
    );
    let explorer = Explorer::new(ExplorerConfig::default().with_data_dir(dir.path()));
    (dir, explorer)
}

// ============================================================================
// Reader / writer
// ============================================================================

#[test]
fn test_header_drop_removes_exactly_one_row() {
    let (dir, _) = create_test_data();
    let path = dir.path().join("Country_Data.csv");
    let with_header = read_table(&path, true).unwrap();
    let without_header = read_table(&path, false).unwrap();

    assert_eq!(with_header.len(), without_header.len() + 1);
    assert_eq!(&with_header.rows[1..], &without_header.rows[..]);
}

#[test]
fn test_read_mixed_types_per_cell() {
    let (dir, _) = create_test_data();
    let table = read_table(dir.path().join("Country_Data.csv"), true).unwrap();

    // Header stays text, body area column is numeric
    assert_eq!(table.rows[0][3], Cell::from("Sq Km"));
    assert_eq!(table.rows[1][3], Cell::Number(569_140.0));
    assert_eq!(table.rows[1][0], Cell::from("Kenya"));
}

#[test]
fn test_write_then_read_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.csv");
    let table = Table::from_rows(vec![
        vec![Cell::from("Kenya"), Cell::Number(2010.0), Cell::Number(74.88)],
        vec![Cell::from("Chad"), Cell::Number(-0.5)],
        vec![Cell::from("Peru"), Cell::from("n/a"), Cell::Number(1e-3)],
    ]);

    write_table(&path, &table, WriteMode::Overwrite).unwrap();
    let loaded = read_table(&path, true).unwrap();
    assert_eq!(loaded, table);
}

#[test]
fn test_append_keeps_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("append.csv");
    let a = Table::from_rows(vec![vec![Cell::from("A"), Cell::Number(1.0)]]);
    let b = Table::from_rows(vec![vec![Cell::from("B"), Cell::Number(2.0)]]);

    write_table(&path, &a, WriteMode::from(true)).unwrap();
    write_table(&path, &b, WriteMode::from(false)).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "A,1\nB,2\n");
    let loaded = read_table(&path, true).unwrap();
    assert_eq!(loaded.rows[0][0], Cell::from("A"));
    assert_eq!(loaded.rows[1][0], Cell::from("B"));
}

#[test]
fn test_overwrite_after_append_leaves_single_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("over.csv");
    let a = Table::from_rows(vec![vec![Cell::from("A")]]);
    let b = Table::from_rows(vec![vec![Cell::from("B")]]);

    write_table(&path, &a, WriteMode::Append).unwrap();
    write_table(&path, &b, WriteMode::Append).unwrap();
    write_table(&path, &a, WriteMode::Overwrite).unwrap();

    assert_eq!(read_table(&path, true).unwrap().len(), 1);
}

#[test]
fn test_read_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = read_table(dir.path().join("nope.csv"), false);
    assert!(matches!(result, Err(ExplorerError::Io(_))));
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_lookup_miss_is_not_found() {
    let (dir, _) = create_test_data();
    let table = read_table(dir.path().join("Country_Data.csv"), false).unwrap();
    let err = find_row_by_key(&table, 0, "Narnia").unwrap_err();
    assert!(matches!(err, ExplorerError::NotFound(_)));
}

#[test]
fn test_lookup_duplicate_key_is_ambiguous() {
    let table = Table::from_rows(vec![
        vec![Cell::from("Chad"), Cell::Number(1.0)],
        vec![Cell::from("Chad"), Cell::Number(2.0)],
    ]);
    let err = find_row_by_key(&table, 0, "Chad").unwrap_err();
    assert!(matches!(err, ExplorerError::Ambiguous { matches: 2, .. }));
}

#[test]
fn test_region_filter_returns_all_members_in_order() {
    let (dir, _) = create_test_data();
    let table = read_table(dir.path().join("Country_Data.csv"), false).unwrap();
    assert_eq!(
        find_rows_by_predicate(&table, 2, "Eastern Africa"),
        vec![0, 1, 2]
    );
}

#[test]
fn test_year_label_lookup() {
    let (dir, _) = create_test_data();
    let table = read_table(dir.path().join("Population_Data.csv"), true).unwrap();
    let header = table.header().unwrap();
    assert_eq!(find_year_column(header, 2000, " Pop").unwrap(), 3);
    assert!(matches!(
        find_year_column(header, 2005, " Pop"),
        Err(ExplorerError::NotFound(_))
    ));
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_region_mean_of_synthetic_table() {
    let row = |key: &str, values: [f64; 4]| -> Vec<Cell> {
        std::iter::once(Cell::from(key))
            .chain(values.into_iter().map(Cell::Number))
            .collect()
    };
    let table = Table::from_rows(vec![
        row("A", [10.0, 20.0, 30.0, 40.0]),
        row("B", [0.0, 0.0, 0.0, 0.0]),
        row("C", [5.0, 5.0, 5.0, 5.0]),
    ]);
    let means: Vec<f64> = table.iter().map(|r| row_mean(r, 0).unwrap()).collect();
    assert_approx_eq!(region_mean(&means).unwrap(), 10.0);
}

#[test]
fn test_min_max_stable_tie_break() {
    let pairs = vec![
        KeyValue::new("A", 5.0),
        KeyValue::new("B", 1.0),
        KeyValue::new("C", 1.0),
    ];
    let max = max_by_value(&pairs).unwrap();
    assert_eq!((max.key.as_str(), max.value), ("A", 5.0));
    let min = min_by_value(&pairs).unwrap();
    assert_eq!((min.key.as_str(), min.value), ("B", 1.0));
}

#[test]
fn test_row_sum_skips_key() {
    let row = vec![Cell::from("Kenya"), Cell::Number(1.0), Cell::Number(2.0)];
    assert_approx_eq!(row_sum(&row, 0), 3.0);
}

// ============================================================================
// Explorer queries
// ============================================================================

#[test]
fn test_species_report_end_to_end() {
    let (_dir, explorer) = create_test_data();
    let report = explorer.species_report("Eastern Africa", "Kenya").unwrap();
    let averages = report.averages();
    assert_eq!(averages.len(), 3);
    assert_eq!(averages[0].key, "Kenya");
    assert_approx_eq!(averages[0].value, 25.0);
    assert_approx_eq!(report.region_average, 10.0);
}

#[test]
fn test_population_change_is_latest_minus_earliest() {
    let (_dir, explorer) = create_test_data();
    let report = explorer.population_report("Kenya", "Eastern Africa").unwrap();
    assert_approx_eq!(report.change, 53_771_000.0 - 31_464_000.0);
    assert_eq!(report.series.first().unwrap().0, 2000);
    assert_eq!(report.series.last().unwrap().0, 2020);

    let shrinking = explorer.population_report("Atlantis", "Lost Lands").unwrap();
    assert_approx_eq!(shrinking.change, -20.0);
}

#[test]
fn test_density_end_to_end() {
    let (_dir, explorer) = create_test_data();
    let report = explorer.population_density(2020, "Chile").unwrap();
    assert_approx_eq!(report.density, 19_116_000.0 / 743_532.0);
}

#[test]
fn test_density_zero_area_raises() {
    let (_dir, explorer) = create_test_data();
    let err = explorer.population_density(2020, "Atlantis").unwrap_err();
    assert!(matches!(err, ExplorerError::DivisionByZero(_)));
}

#[test]
fn test_density_unknown_country() {
    let (_dir, explorer) = create_test_data();
    let err = explorer.population_density(2020, "Narnia").unwrap_err();
    assert!(matches!(err, ExplorerError::NotFound(_)));
}

#[test]
fn test_export_density_overwrite_then_append() {
    let (dir, explorer) = create_test_data();
    let out = dir.path().join("Density_Data.csv");

    let kenya = explorer.population_density(2010, "Kenya").unwrap();
    let chile = explorer.population_density(2010, "Chile").unwrap();
    explorer
        .export_density(&kenya, &out, WriteMode::Overwrite)
        .unwrap();
    explorer.export_density(&chile, &out, WriteMode::Append).unwrap();

    let table = read_table(&out, true).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0][0], Cell::from("Kenya"));
    assert_eq!(table.rows[0][1], Cell::Number(2010.0));
    assert_approx_eq!(table.number_at(0, 2).unwrap(), 74.88);
    assert_eq!(table.rows[1][0], Cell::from("Chile"));
}

#[test]
fn test_species_extreme_end_to_end() {
    let (_dir, explorer) = create_test_data();
    let min = explorer
        .species_extreme("Eastern Africa", Extreme::Min)
        .unwrap();
    assert_eq!(min.selected.key, "Uganda");
    let max = explorer
        .species_extreme("Eastern Africa", Extreme::Max)
        .unwrap();
    assert_eq!(max.selected.key, "Kenya");
    assert_approx_eq!(max.selected.value, 100.0);
}

#[test]
fn test_species_missing_for_region_member() {
    let (dir, explorer) = create_test_data();
    write_file(
        dir.path(),
        "Threatened_Species.csv",
        "Country,Mammals,Birds,Fish,Plants\nKenya,10,20,30,40\n",
    );
    let err = explorer.species_report("Eastern Africa", "Kenya").unwrap_err();
    assert!(matches!(err, ExplorerError::NotFound(_)));
}

#[test]
fn test_queries_reread_files() {
    let (dir, explorer) = create_test_data();
    assert_eq!(explorer.regions().unwrap().len(), 3);
    write_file(
        dir.path(),
        "Country_Data.csv",
        "Country,UN Region,UN Sub-Region,Sq Km\nFiji,Oceania,Melanesia,18274\n",
    );
    assert_eq!(explorer.regions().unwrap(), vec!["Melanesia"]);
}
