mod tables;
mod charts;

pub use tables::{
    format_species_table, print_species_table,
    format_population_summary, print_population_summary,
    format_density_summary, print_density_summary,
    format_extreme_summary, print_extreme_summary,
    format_region_list, print_region_list,
};
pub use charts::{
    format_bar_chart, format_population_chart, format_species_chart, print_population_chart,
    print_species_chart,
};
