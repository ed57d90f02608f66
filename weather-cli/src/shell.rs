//! Interactive numbered menu.
//!
//! The shell owns the session state and talks to the user only through the
//! injected reader and writers, so it runs the same against a terminal or
//! in-memory buffers.

use anyhow::{Context, Result, anyhow, bail};
use std::{
    io::{BufRead, Write},
    path::Path,
};
use tracing::debug;
use weather_core::{
    CloudStorage, Config, DataProvider, DataRequest, DateRange, ExportFormat, Location,
    LocationStore, ProviderId, VariableStore, WeatherVariable, export, model::parse_number,
    provider::{handle_response, provider_from_config},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddLocation,
    ListLocations,
    AddVariable,
    ListVariables,
    FetchForecast,
    FetchHistorical,
    ExportCsv,
    ExportJson,
    ToggleOffline,
    Exit,
}

impl MenuChoice {
    pub const fn all() -> &'static [MenuChoice] {
        &[
            MenuChoice::AddLocation,
            MenuChoice::ListLocations,
            MenuChoice::AddVariable,
            MenuChoice::ListVariables,
            MenuChoice::FetchForecast,
            MenuChoice::FetchHistorical,
            MenuChoice::ExportCsv,
            MenuChoice::ExportJson,
            MenuChoice::ToggleOffline,
            MenuChoice::Exit,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AddLocation => "Add Location",
            MenuChoice::ListLocations => "List Locations",
            MenuChoice::AddVariable => "Add Weather Variable",
            MenuChoice::ListVariables => "List Weather Variables",
            MenuChoice::FetchForecast => "Fetch Weather Forecast",
            MenuChoice::FetchHistorical => "Fetch Historical Weather Data",
            MenuChoice::ExportCsv => "Export Data to CSV",
            MenuChoice::ExportJson => "Export Data to JSON",
            MenuChoice::ToggleOffline => "Toggle Offline Mode",
            MenuChoice::Exit => "Exit",
        }
    }

    /// The number typed to select this entry.
    pub fn number(&self) -> usize {
        Self::all()
            .iter()
            .position(|c| c == self)
            .map_or(0, |idx| idx + 1)
    }
}

impl TryFrom<&str> for MenuChoice {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        trimmed
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| Self::all().get(idx).copied())
            // Reject "01", "+1" and friends: only the exact menu number counts.
            .filter(|choice| choice.number().to_string() == trimmed)
            .ok_or_else(|| anyhow!("Unknown menu choice '{trimmed}'"))
    }
}

/// Everything a running session owns.
#[derive(Debug)]
pub struct Session {
    pub locations: LocationStore,
    pub variables: VariableStore,
    pub storage: CloudStorage,
    forecast: Box<dyn DataProvider>,
    historical: Box<dyn DataProvider>,
}

impl Session {
    pub fn from_config(config: &Config) -> Self {
        let storage = CloudStorage::from_config(&config.storage);
        debug!(
            cache_file = %storage.cache_file().display(),
            offline = storage.is_offline(),
            has_credentials = storage.has_credentials(),
            "session started"
        );

        Self {
            locations: LocationStore::new(),
            variables: VariableStore::new(),
            storage,
            forecast: provider_from_config(ProviderId::Forecast, config),
            historical: provider_from_config(ProviderId::Historical, config),
        }
    }
}

pub struct Shell<R, W, E> {
    session: Session,
    input: R,
    out: W,
    err: E,
}

impl<R: BufRead, W: Write, E: Write> Shell<R, W, E> {
    pub fn new(session: Session, input: R, out: W, err: E) -> Self {
        Self { session, input, out, err }
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Run until the user picks Exit or input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;

            let Some(line) = self.read_line()? else {
                debug!("input closed, leaving menu");
                break;
            };

            let choice = match MenuChoice::try_from(line.as_str()) {
                Ok(choice) => choice,
                Err(err) => {
                    debug!("{err}");
                    writeln!(self.out, "Invalid choice, please try again.")?;
                    continue;
                }
            };

            if choice == MenuChoice::Exit {
                break;
            }

            debug!(?choice, "dispatching");
            if let Err(err) = self.execute(choice).await {
                writeln!(self.err, "Error: {err:#}")?;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    async fn execute(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::AddLocation => self.add_location(),
            MenuChoice::ListLocations => self.list_locations(),
            MenuChoice::AddVariable => self.add_variable(),
            MenuChoice::ListVariables => self.list_variables(),
            MenuChoice::FetchForecast => self.fetch_forecast().await,
            MenuChoice::FetchHistorical => self.fetch_historical().await,
            MenuChoice::ExportCsv => self.export(ExportFormat::Csv),
            MenuChoice::ExportJson => self.export(ExportFormat::Json),
            MenuChoice::ToggleOffline => self.toggle_offline(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn add_location(&mut self) -> Result<()> {
        let name = self.prompt("Enter location name: ")?;
        let latitude = parse_number("latitude", &self.prompt("Enter latitude: ")?)?;
        let longitude = parse_number("longitude", &self.prompt("Enter longitude: ")?)?;

        self.session.locations.add(Location::new(name, latitude, longitude));
        Ok(())
    }

    fn list_locations(&mut self) -> Result<()> {
        for location in self.session.locations.list() {
            writeln!(self.out, "{location}")?;
        }
        Ok(())
    }

    fn add_variable(&mut self) -> Result<()> {
        let name = self.prompt("Enter weather variable name: ")?;
        let value = parse_number("value", &self.prompt("Enter value: ")?)?;

        self.session.variables.add(WeatherVariable::new(name, value));
        Ok(())
    }

    fn list_variables(&mut self) -> Result<()> {
        for variable in self.session.variables.list() {
            writeln!(self.out, "{variable}")?;
        }
        Ok(())
    }

    async fn fetch_forecast(&mut self) -> Result<()> {
        let name = self.prompt("Enter location name for forecast: ")?;
        let request = DataRequest::Forecast {
            location: Location::named(name),
        };

        self.fetch(request).await
    }

    async fn fetch_historical(&mut self) -> Result<()> {
        let name = self.prompt("Enter location name for historical data: ")?;
        let start = self.prompt("Enter start date (YYYY-MM-DD): ")?;
        let end = self.prompt("Enter end date (YYYY-MM-DD): ")?;
        let request = DataRequest::Historical {
            location: Location::named(name),
            range: DateRange::new(start, end),
        };

        self.fetch(request).await
    }

    /// Send `request` to the provider for its kind and print the response.
    async fn fetch(&mut self, request: DataRequest) -> Result<()> {
        debug!(kind = request.kind(), location = %request.location().name, "fetching");

        let provider = match request {
            DataRequest::Forecast { .. } => &self.session.forecast,
            DataRequest::Historical { .. } => &self.session.historical,
        };
        let response = provider.fetch(&request).await?;
        handle_response(&mut self.out, &response)?;
        Ok(())
    }

    fn export(&mut self, format: ExportFormat) -> Result<()> {
        let data = self.prompt("Enter data to export: ")?;
        let filename = self.prompt(&format!("Enter filename for {format}: "))?;
        if filename.trim().is_empty() {
            bail!("No filename given for {format} export");
        }

        export::export(format, &data, Path::new(&filename))
    }

    fn toggle_offline(&mut self) -> Result<()> {
        let offline = self.session.storage.toggle_offline();
        writeln!(
            self.out,
            "Offline mode is now {}",
            if offline { "enabled" } else { "disabled" }
        )?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out, "Menu:")?;
        for choice in MenuChoice::all() {
            writeln!(self.out, "{}. {}", choice.number(), choice.label())?;
        }
        write!(self.out, "Enter choice: ")?;
        self.out.flush()?;
        Ok(())
    }

    /// Print `label` and read the answer; running out of input mid-command is an error.
    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        self.read_line()?
            .ok_or_else(|| anyhow!("Input ended before the command was complete"))
    }

    /// Next line without its line terminator, or `None` at end of input.
    /// Bytes that are not valid UTF-8 become U+FFFD instead of failing the read.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut buf)
            .context("Failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }

        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, io::Cursor};

    struct Outcome {
        session: Session,
        out: String,
        err: String,
    }

    async fn run_script(script: &str) -> Outcome {
        run_script_with(Config::default(), script).await
    }

    async fn run_script_with(config: Config, script: &str) -> Outcome {
        run_bytes(config, script.as_bytes()).await
    }

    async fn run_bytes(config: Config, input: &[u8]) -> Outcome {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut shell = Shell::new(
            Session::from_config(&config),
            Cursor::new(input.to_vec()),
            &mut out,
            &mut err,
        );
        shell.run().await.expect("shell run should succeed");
        let session = shell.into_session();

        Outcome {
            session,
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
        }
    }

    #[test]
    fn menu_choice_roundtrip() {
        for choice in MenuChoice::all() {
            let parsed = MenuChoice::try_from(choice.number().to_string().as_str()).unwrap();
            assert_eq!(*choice, parsed);
        }
        assert_eq!(MenuChoice::Exit.number(), 10);
    }

    #[test]
    fn menu_choice_rejects_out_of_range_and_padding() {
        for bad in ["0", "11", "01", "+1", "one", ""] {
            assert!(MenuChoice::try_from(bad).is_err(), "{bad:?} should be rejected");
        }
        assert_eq!(MenuChoice::try_from(" 3 ").unwrap(), MenuChoice::AddVariable);
    }

    #[tokio::test]
    async fn prints_full_menu_and_exits() {
        let outcome = run_script("10\n").await;

        assert!(outcome.out.starts_with("Menu:\n1. Add Location\n2. List Locations\n"));
        assert!(outcome.out.contains("9. Toggle Offline Mode\n10. Exit\nEnter choice: "));
        assert!(outcome.err.is_empty());
    }

    #[tokio::test]
    async fn add_and_list_locations() {
        let outcome =
            run_script("1\nParis\n48.8566\n2.3522\n1\nNew York\n40.7128\n-74.006\n2\n10\n").await;

        assert_eq!(outcome.session.locations.len(), 2);
        assert!(outcome
            .out
            .contains("Name: Paris, Latitude: 48.8566, Longitude: 2.3522\nName: New York, Latitude: 40.7128, Longitude: -74.006\n"));
    }

    #[tokio::test]
    async fn invalid_number_cancels_command_and_keeps_store() {
        let outcome = run_script("1\nParis\nnorth\n2\n10\n").await;

        assert!(outcome.session.locations.is_empty());
        assert!(outcome.err.contains("Error: 'north' is not a valid number for latitude"));
        // The loop went on to handle "2" and then "10".
        assert_eq!(outcome.out.matches("Menu:").count(), 3);
    }

    #[tokio::test]
    async fn add_and_list_variables() {
        let outcome = run_script("3\nwind speed\n12.5\n4\n10\n").await;

        assert_eq!(outcome.session.variables.len(), 1);
        assert!(outcome.out.contains("Variable: wind speed, Value: 12.5\n"));
    }

    #[tokio::test]
    async fn listing_empty_stores_prints_nothing() {
        let outcome = run_script("2\n4\n10\n").await;

        assert!(!outcome.out.contains("Name:"));
        assert!(!outcome.out.contains("Variable:"));
        assert!(outcome.err.is_empty());
    }

    #[tokio::test]
    async fn forecast_and_history_are_printed() {
        let outcome = run_script("5\nParis\n6\nParis\n2024-01-01\n2024-01-31\n10\n").await;

        assert!(outcome.out.contains("Mock Forecast data for Paris\n"));
        assert!(outcome
            .out
            .contains("Mock Historical data for Paris from 2024-01-01 to 2024-01-31\n"));
    }

    #[tokio::test]
    async fn unknown_choice_is_reported_and_loop_continues() {
        let outcome = run_script("hello\n10\n").await;

        assert!(outcome.out.contains("Invalid choice, please try again.\n"));
        assert_eq!(outcome.out.matches("Menu:").count(), 2);
    }

    #[tokio::test]
    async fn toggle_offline_message_matches_flag() {
        let outcome = run_script("9\n").await;
        assert!(outcome.out.contains("Offline mode is now enabled\n"));
        assert!(outcome.session.storage.is_offline());

        let outcome = run_script("9\n9\n").await;
        assert!(outcome.out.contains("Offline mode is now disabled\n"));
        assert!(!outcome.session.storage.is_offline());
    }

    #[tokio::test]
    async fn toggle_starts_from_configured_flag() {
        let mut config = Config::default();
        config.storage.offline = true;

        let outcome = run_script_with(config, "9\n10\n").await;
        assert!(outcome.out.contains("Offline mode is now disabled\n"));
    }

    #[tokio::test]
    async fn exports_csv_and_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("data.csv");
        let json = dir.path().join("data.json");
        let script = format!(
            "7\na,b,c\n{}\n8\nsay \"hi\"\n{}\n10\n",
            csv.display(),
            json.display()
        );

        let outcome = run_script(&script).await;

        assert!(outcome.err.is_empty(), "unexpected errors: {}", outcome.err);
        assert_eq!(fs::read_to_string(&csv).unwrap(), "a,b,c");
        assert_eq!(fs::read_to_string(&json).unwrap(), r#"{"data":"say \"hi\""}"#);
    }

    #[tokio::test]
    async fn export_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("data.csv");
        let script = format!("7\nx\n{}\n10\n", target.display());

        let outcome = run_script(&script).await;

        assert!(outcome.err.starts_with("Error: Failed to write CSV export"));
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn empty_filename_is_rejected() {
        let outcome = run_script("8\nhello\n\n10\n").await;
        assert!(outcome.err.contains("No filename given for JSON export"));
    }

    #[tokio::test]
    async fn end_of_input_mid_command_leaves_store_untouched() {
        let outcome = run_script("1\nParis\n48.8").await;

        assert!(outcome.session.locations.is_empty());
        assert!(outcome.err.contains("Input ended before the command was complete"));
    }

    #[tokio::test]
    async fn windows_line_endings_are_accepted() {
        let outcome = run_script("3\r\nrain\r\n0.4\r\n10\r\n").await;

        assert_eq!(outcome.session.variables.list()[0], WeatherVariable::new("rain", 0.4));
    }

    #[tokio::test]
    async fn non_utf8_menu_input_is_an_invalid_choice() {
        let outcome = run_bytes(Config::default(), b"\xff\xfe\n3\nrain\n1\n10\n").await;

        assert!(outcome.out.contains("Invalid choice, please try again.\n"));
        assert_eq!(outcome.session.variables.list(), &[WeatherVariable::new("rain", 1.0)]);
    }

    #[tokio::test]
    async fn non_utf8_name_is_stored_with_replacement_characters() {
        let outcome = run_bytes(Config::default(), b"3\nr\xffin\n2\n10\n").await;

        assert_eq!(outcome.session.variables.list()[0].name, "r\u{fffd}in");
        assert!(outcome.err.is_empty());
    }
}
