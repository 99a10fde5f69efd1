//! Interactive menu loop.
//!
//! The session owns every retry: the query functions in [`crate::analysis`]
//! are single request/response calls, and anything that fails here is
//! reported and the user is prompted again.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::analysis::Explorer;
use crate::error::ExplorerError;
use crate::io::WriteMode;
use crate::models::Extreme;
use crate::visualization::{
    format_density_summary, format_extreme_summary, format_population_chart,
    format_population_summary, format_species_chart, format_species_table,
};

const INVALID_INPUT: &str = "\n--Invalid input please try again--";

/// Menu choices after a country has been selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Restart,
    SpeciesAverage,
    PopulationChange,
    PopulationDensity,
    SpeciesExtreme,
}

impl std::str::FromStr for MenuOption {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(MenuOption::Restart),
            "1" => Ok(MenuOption::SpeciesAverage),
            "2" => Ok(MenuOption::PopulationChange),
            "3" => Ok(MenuOption::PopulationDensity),
            "4" => Ok(MenuOption::SpeciesExtreme),
            _ => Err(ExplorerError::InvalidInput(format!(
                "Unknown menu option: '{}'",
                s.trim()
            ))),
        }
    }
}

/// Find the stored spelling of `input` among `known`, ignoring case and
/// surrounding whitespace.
pub fn canonical_name(input: &str, known: &[String]) -> Option<String> {
    let wanted = input.trim().to_lowercase();
    known
        .iter()
        .find(|candidate| candidate.to_lowercase() == wanted)
        .cloned()
}

/// Parse a year typed by the user.
pub fn parse_year(input: &str) -> Result<i32, ExplorerError> {
    input
        .trim()
        .parse()
        .map_err(|_| ExplorerError::InvalidInput(format!("'{}' is not a year", input.trim())))
}

/// An interactive session reading answers from `input` and writing to `output`.
pub struct Session<'a, R, W> {
    explorer: &'a Explorer,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(explorer: &'a Explorer, input: R, output: W) -> Self {
        Self {
            explorer,
            input,
            output,
        }
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> Result<(), ExplorerError> {
        while let Some(region) = self.choose_region()? {
            let Some(country) = self.choose_country(&region)? else {
                continue;
            };
            let Some(option) = self.choose_option()? else {
                break;
            };
            if option == MenuOption::Restart {
                continue;
            }
            if let Err(e) = self.handle_option(option, &region, &country) {
                tracing::warn!(?option, "query failed");
                self.report(&e)?;
            }
        }

        writeln!(self.output, "\nThank you for using our program!")?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>, ExplorerError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Show a failed lookup or query and carry on with the session.
    fn report(&mut self, error: &ExplorerError) -> Result<(), ExplorerError> {
        tracing::warn!(error = %error, "reported to user");
        writeln!(self.output, "\n--{error}--")?;
        Ok(())
    }

    fn invalid(&mut self) -> Result<(), ExplorerError> {
        writeln!(self.output, "{INVALID_INPUT}")?;
        Ok(())
    }

    /// `None` when the user quits.
    fn choose_region(&mut self) -> Result<Option<String>, ExplorerError> {
        loop {
            let Some(answer) = self.prompt("\nPlease enter a sub-region (or type 0 to quit): ")?
            else {
                return Ok(None);
            };
            if answer == "0" {
                return Ok(None);
            }
            let regions = match self.explorer.regions() {
                Ok(regions) => regions,
                Err(e) => {
                    self.report(&e)?;
                    continue;
                }
            };
            match canonical_name(&answer, &regions) {
                Some(region) => return Ok(Some(region)),
                None => self.invalid()?,
            }
        }
    }

    /// `None` when the user goes back to the region prompt.
    fn choose_country(&mut self, region: &str) -> Result<Option<String>, ExplorerError> {
        loop {
            let Some(answer) =
                self.prompt("\nPlease enter a country in the sub-region (or type 0 to go back): ")?
            else {
                return Ok(None);
            };
            if answer == "0" {
                return Ok(None);
            }
            let names = match self.explorer.country_names() {
                Ok(names) => names,
                Err(e) => {
                    self.report(&e)?;
                    continue;
                }
            };
            let Some(country) = canonical_name(&answer, &names) else {
                self.invalid()?;
                continue;
            };
            match self.explorer.resolve_selection(region, &country) {
                Ok(selection) => return Ok(Some(selection.country)),
                Err(ExplorerError::NotInRegion { .. }) => {
                    writeln!(self.output, "\n--Country is not in region please try again--")?;
                }
                Err(ExplorerError::NotFound(_)) | Err(ExplorerError::Ambiguous { .. }) => {
                    self.invalid()?
                }
                Err(e) => self.report(&e)?,
            }
        }
    }

    /// `None` only when input ends.
    fn choose_option(&mut self) -> Result<Option<MenuOption>, ExplorerError> {
        loop {
            let Some(answer) = self.prompt(
                "\nPlease select an option: (or type 0 to restart)\
                 \n\t1. Average number of threatened species\
                 \n\t2. The change in population over time\
                 \n\t3. Population density\
                 \n\t4. Find which country in the selected region has the min/max number of threatened species\
                 \n>> ",
            )?
            else {
                return Ok(None);
            };
            match answer.parse::<MenuOption>() {
                Ok(option) => return Ok(Some(option)),
                Err(_) => self.invalid()?,
            }
        }
    }

    /// Ask until the answer is yes or no. End of input counts as no.
    fn ask_yes_no(&mut self, question: &str) -> Result<bool, ExplorerError> {
        loop {
            let Some(answer) = self.prompt(&format!("\n{question} (yes/no): "))? else {
                return Ok(false);
            };
            match answer.to_lowercase().as_str() {
                "yes" | "y" => return Ok(true),
                "no" | "n" => return Ok(false),
                _ => self.invalid()?,
            }
        }
    }

    fn handle_option(
        &mut self,
        option: MenuOption,
        region: &str,
        country: &str,
    ) -> Result<(), ExplorerError> {
        match option {
            MenuOption::Restart => Ok(()),
            MenuOption::SpeciesAverage => self.species_average(region, country),
            MenuOption::PopulationChange => self.population_change(country, region),
            MenuOption::PopulationDensity => self.population_density(country),
            MenuOption::SpeciesExtreme => self.species_extreme(region),
        }
    }

    fn species_average(&mut self, region: &str, country: &str) -> Result<(), ExplorerError> {
        writeln!(
            self.output,
            "\nCalculating average number of threatened species in {region} and in {country}..."
        )?;
        let report = self.explorer.species_report(region, country)?;
        write!(self.output, "{}", format_species_table(&report))?;

        if self.ask_yes_no(
            "Would you like to display a bar graph showing the threatened species in each country?",
        )? {
            write!(self.output, "{}", format_species_chart(&report))?;
        }
        Ok(())
    }

    fn population_change(&mut self, country: &str, region: &str) -> Result<(), ExplorerError> {
        writeln!(self.output, "\nAnalyzing population change over time for {country}...")?;
        let report = self.explorer.population_report(country, region)?;
        write!(self.output, "{}", format_population_summary(&report))?;
        writeln!(
            self.output,
            "\nThe change in population from {} to {} in {country} is: {:.0} people",
            report.earliest_year, report.latest_year, report.change
        )?;
        writeln!(
            self.output,
            "The average population in {country} from {} to {} is: {:.0} people",
            report.earliest_year, report.latest_year, report.average
        )?;

        if self.ask_yes_no(&format!(
            "Would you like two graphs, one of population vs time for {country} and \
             the other for the latest population of each country in the sub-region?"
        ))? {
            write!(self.output, "{}", format_population_chart(&report))?;
        }
        Ok(())
    }

    fn population_density(&mut self, country: &str) -> Result<(), ExplorerError> {
        let year = loop {
            let Some(answer) = self.prompt("\nWhich year? (Input a year from 2000 to 2020): ")?
            else {
                return Ok(());
            };
            match parse_year(&answer) {
                Ok(year) => break year,
                Err(e) => writeln!(self.output, "\n--{e}--")?,
            }
        };

        writeln!(
            self.output,
            "\nCalculating population density for the year {year} for {country}..."
        )?;
        let report = self.explorer.population_density(year, country)?;
        write!(self.output, "{}", format_density_summary(&report))?;

        if !self.ask_yes_no("Would you like to save this data as a CSV file?")? {
            return Ok(());
        }
        let Some(file) = self.prompt("\nEnter the name of the file (ex. Density_Data.csv): ")?
        else {
            return Ok(());
        };

        let path = PathBuf::from(file);
        match self
            .explorer
            .export_density(&report, &path, WriteMode::Overwrite)
        {
            Ok(()) => writeln!(self.output, "\nData saved to {}", path.display())?,
            Err(e) => {
                // A failed save is reported and the session carries on
                tracing::warn!(error = %e, path = %path.display(), "export failed");
                writeln!(self.output, "\n---Error saving data---")?;
            }
        }
        Ok(())
    }

    fn species_extreme(&mut self, region: &str) -> Result<(), ExplorerError> {
        let extreme = loop {
            let Some(answer) = self.prompt("\nMin or max? ")? else {
                return Ok(());
            };
            match answer.parse::<Extreme>() {
                Ok(extreme) => break extreme,
                Err(_) => self.invalid()?,
            }
        };

        writeln!(
            self.output,
            "\nFinding the country with the {extreme} of threatened species in {region}..."
        )?;
        let report = self.explorer.species_extreme(region, extreme)?;
        write!(self.output, "{}", format_extreme_summary(&report))?;
        Ok(())
    }
}
