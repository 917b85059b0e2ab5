//! deboard - research dashboard for Differential Evolution experiments
//! Command-line interface
//!
//! Copyright (C) 2026 DE Research Platform developers
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use deboard_env::constants::{API_URL_VAR, STATE_DIR_VAR};
use deboard_env::{get_api_base_url_with, get_state_dir_with};
use deboard_gateway::{
    AuthSession, FileTokenStore, HttpGateway, ProfileUpdate, RemoteGateway, TokenStore,
};
use deboard_results::{
    ChartKind, CrossoverFilter, CrossoverMethod, SelectionMethod, StaticResultStore,
};
use deboard_wizard::{
    ConfigWizard, NumericField, QUEUE_FULL_MESSAGE, QUEUE_FULL_TITLE, SetField,
    SimulationContext, SubmissionOutcome, ValidationErrors, WizardError,
};

use crate::analytics::AnalyticsView;
use crate::auth::{LoginForm, RegistrationForm, submit_login, submit_registration};
use crate::error::DashboardError;
use crate::records::{BenchmarkFilter, RecordTable, SortConfig, SortDirection, SortKey};

/// Research dashboard for Differential Evolution experiments.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL. Defaults to $DEBOARD_API_URL or http://localhost:3000/api.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding the login token. Defaults to $DEBOARD_DIR or ~/.deboard.
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in and store the token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored token
    Logout,
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        affiliation: String,
    },
    /// Update the profile of the logged in user
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        affiliation: Option<String>,
    },
    /// Configure and start a simulation
    Submit(SubmitArgs),
    /// List past simulations
    List {
        /// Benchmark function to show, or "all"
        #[arg(long, default_value = "all")]
        benchmark: String,
        /// model, benchmark, bestFitness or timestamp
        #[arg(long)]
        sort: Option<SortKey>,
        /// asc or desc
        #[arg(long)]
        order: Option<SortDirection>,
    },
    /// Show one simulation as JSON
    Show { id: String },
    /// Delete one simulation
    Delete { id: String },
    /// Compare DE variants on the built-in result table
    Analytics {
        /// Crossover method, or "all"
        #[arg(long, default_value = "exponential")]
        crossover: CrossoverFilter,
        #[arg(long)]
        no_sts: bool,
        #[arg(long)]
        no_greedy: bool,
        /// bar or line
        #[arg(long, default_value = "bar")]
        chart: ChartKind,
        /// Write an HTML report instead of printing a summary
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print one record of the built-in result table
    Lookup {
        crossover: CrossoverMethod,
        selection: SelectionMethod,
        function: String,
    },
}

/// Wizard fields; numeric values are passed through as typed so the wizard
/// reports malformed input with its own messages.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SubmitArgs {
    /// Population size NP (10-20)
    #[arg(long)]
    pub population: Option<String>,
    /// Scaling factor F (0.1-2.0)
    #[arg(long)]
    pub scaling_factor: Option<String>,
    /// Crossover rate CR (0.01-1.0)
    #[arg(long)]
    pub crossover_rate: Option<String>,
    /// Problem dimension (1-1000)
    #[arg(long)]
    pub dimension: Option<String>,
    /// Number of generations (1-100000)
    #[arg(long)]
    pub generations: Option<String>,
    /// Benchmark function, repeatable
    #[arg(long = "benchmark")]
    pub benchmarks: Vec<String>,
    /// Mutation scheme, repeatable
    #[arg(long = "mutation-scheme")]
    pub mutation_schemes: Vec<String>,
    /// Crossover method key, repeatable
    #[arg(long = "crossover")]
    pub crossover_methods: Vec<String>,
    /// Selection method key, repeatable
    #[arg(long = "selection")]
    pub selection_methods: Vec<String>,
    /// Expand every section of the confirmation summary
    #[arg(long)]
    pub expand: bool,
    /// Stop after the confirmation summary
    #[arg(long)]
    pub dry_run: bool,
}

impl SubmitArgs {
    fn numeric(&self) -> [(NumericField, Option<&String>); 5] {
        [
            (NumericField::Population, self.population.as_ref()),
            (NumericField::ScalingFactor, self.scaling_factor.as_ref()),
            (NumericField::CrossoverRate, self.crossover_rate.as_ref()),
            (NumericField::Dimension, self.dimension.as_ref()),
            (NumericField::Generations, self.generations.as_ref()),
        ]
    }

    fn sets(&self) -> [(SetField, &Vec<String>); 4] {
        [
            (SetField::Benchmarks, &self.benchmarks),
            (SetField::MutationSchemes, &self.mutation_schemes),
            (SetField::CrossoverMethods, &self.crossover_methods),
            (SetField::SelectionMethods, &self.selection_methods),
        ]
    }
}

impl Cli {
    fn lookup_override<'a>(
        var: &'static str,
        value: Option<&'a str>,
    ) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| match value {
            Some(v) if key == var => Some(v.to_string()),
            _ => std::env::var(key).ok(),
        }
    }

    pub fn api_base_url(&self) -> Result<String, DashboardError> {
        let lookup = Self::lookup_override(API_URL_VAR, self.api_url.as_deref());
        Ok(get_api_base_url_with(lookup)?)
    }

    pub fn token_store(&self) -> Result<FileTokenStore, DashboardError> {
        let dir = self.state_dir.as_ref().map(|d| d.to_string_lossy().to_string());
        let lookup = Self::lookup_override(STATE_DIR_VAR, dir.as_deref());
        Ok(FileTokenStore::in_dir(&get_state_dir_with(lookup)?))
    }

    pub fn gateway(&self) -> Result<HttpGateway, DashboardError> {
        let tokens: Arc<dyn TokenStore> = Arc::new(self.token_store()?);
        Ok(HttpGateway::new(self.api_base_url()?, tokens))
    }
}

fn write_errors<W: Write>(out: &mut W, page: u8, errors: &ValidationErrors) -> Result<(), DashboardError> {
    writeln!(out, "Page {page} has errors:")?;
    for (field, message) in errors.iter() {
        writeln!(out, "  {field}: {message}")?;
    }
    Ok(())
}

async fn submit<G: RemoteGateway + 'static, W: Write>(
    gateway: Arc<G>,
    args: &SubmitArgs,
    out: &mut W,
) -> Result<(), DashboardError> {
    let mut wizard = ConfigWizard::with_defaults(gateway, SimulationContext::new());
    for (field, value) in args.numeric() {
        if let Some(value) = value {
            wizard.set_field(field, value.as_str());
        }
    }
    for (field, values) in args.sets() {
        if !values.is_empty() {
            wizard.set_members(field, values.iter())?;
        }
    }

    if !wizard.advance() {
        write_errors(out, 1, wizard.errors())?;
        return Err(WizardError::InvalidDraft(wizard.errors().clone()).into());
    }
    if !wizard.request_confirmation()? {
        write_errors(out, 2, wizard.errors())?;
        return Err(WizardError::InvalidDraft(wizard.errors().clone()).into());
    }

    if let Some(view) = wizard.confirmation_mut()
        && args.expand
    {
        view.expand_all();
    }
    if let Some(view) = wizard.confirmation() {
        write!(out, "{}", view.render())?;
    }
    if args.dry_run {
        writeln!(out, "Dry run, nothing submitted")?;
        return Ok(());
    }

    let token = wizard.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });
    let outcome = wizard.confirm_and_submit().await;
    interrupt.abort();

    match outcome? {
        SubmissionOutcome::Succeeded(created) => {
            writeln!(out, "Simulation {} started", created.id)?;
            Ok(())
        }
        SubmissionOutcome::QueueFull => {
            writeln!(out, "{QUEUE_FULL_TITLE}: {QUEUE_FULL_MESSAGE}")?;
            Err(DashboardError::Submission(QUEUE_FULL_MESSAGE.to_string()))
        }
        SubmissionOutcome::Failed { message } => Err(DashboardError::Submission(message)),
        SubmissionOutcome::Cancelled => {
            writeln!(out, "Submission cancelled")?;
            Ok(())
        }
    }
}

fn analytics<W: Write>(
    view: &AnalyticsView,
    output: Option<&PathBuf>,
    out: &mut W,
) -> Result<(), DashboardError> {
    let store = StaticResultStore::builtin()?;
    if let Some(path) = output {
        view.write_report(&store, path)?;
        writeln!(out, "Report written to {}", path.display())?;
        return Ok(());
    }

    let charts = view.charts(&store);
    if charts.is_empty() {
        writeln!(out, "No results for the current filter")?;
    }
    for chart in charts {
        writeln!(out, "{} ({:?} scale)", chart.name, chart.scale)?;
        for dataset in &chart.datasets {
            writeln!(out, "  {}", dataset.label)?;
            for (label, point) in chart.labels.iter().zip(&dataset.points) {
                if let Some(point) = point {
                    writeln!(out, "    {label:<24} {}", point.display())?;
                }
            }
        }
    }
    Ok(())
}

/// Execute one parsed command, writing user-facing text to `out`
pub async fn run<W: Write>(cli: Cli, out: &mut W) -> Result<(), DashboardError> {
    match &cli.command {
        Command::Login { email, password } => {
            let gateway = cli.gateway()?;
            let mut session = AuthSession::new(gateway.clone(), gateway.tokens());
            let message = submit_login(&mut session, &LoginForm::new(email, password)).await?;
            writeln!(out, "{message}")?;
        }
        Command::Logout => {
            let gateway = cli.gateway()?;
            let mut session = AuthSession::new(gateway.clone(), gateway.tokens());
            session.logout()?;
            writeln!(out, "Logged out")?;
        }
        Command::Register {
            name,
            email,
            password,
            affiliation,
        } => {
            let form = RegistrationForm {
                name: name.clone(),
                email: email.clone(),
                password: password.clone(),
                affiliation: affiliation.clone(),
            };
            let message = submit_registration(&cli.gateway()?, &form).await?;
            writeln!(
                out,
                "{}",
                message.as_deref().unwrap_or("Registration successful, please log in")
            )?;
        }
        Command::Profile {
            name,
            email,
            affiliation,
        } => {
            let update = ProfileUpdate {
                name: name.clone(),
                email: email.clone(),
                affiliation: affiliation.clone(),
            };
            let user = cli.gateway()?.update_profile(&update).await?;
            writeln!(out, "{} <{}>", user.name, user.email)?;
        }
        Command::Submit(args) => {
            submit(Arc::new(cli.gateway()?), args, out).await?;
        }
        Command::List {
            benchmark,
            sort,
            order,
        } => {
            let records = cli.gateway()?.list_simulations().await?;
            let mut table = RecordTable::new(records);
            table.set_filter(BenchmarkFilter::from(benchmark.as_str()));
            if let Some(key) = sort {
                table.set_sort(SortConfig {
                    key: *key,
                    direction: order.unwrap_or(SortDirection::Ascending),
                });
            } else if let Some(direction) = order {
                table.set_sort(SortConfig {
                    direction: *direction,
                    ..SortConfig::default()
                });
            }
            writeln!(out, "{}", table.stats(&SimulationContext::new()).render())?;
            write!(out, "{}", table.render())?;
        }
        Command::Show { id } => {
            let record = cli.gateway()?.get_simulation(id).await?;
            let json = serde_json::to_string_pretty(&record)
                .map_err(|e| DashboardError::Output(std::io::Error::other(e)))?;
            writeln!(out, "{json}")?;
        }
        Command::Delete { id } => {
            cli.gateway()?.delete_simulation(id).await?;
            writeln!(out, "Deleted simulation {id}")?;
        }
        Command::Analytics {
            crossover,
            no_sts,
            no_greedy,
            chart,
            output,
        } => {
            let view = AnalyticsView {
                filter: *crossover,
                show_sts: !no_sts,
                show_greedy: !no_greedy,
                kind: *chart,
            };
            analytics(&view, output.as_ref(), out)?;
        }
        Command::Lookup {
            crossover,
            selection,
            function,
        } => {
            let store = StaticResultStore::builtin()?;
            match store.lookup(*crossover, *selection, function) {
                Some(record) => {
                    writeln!(out, "{}", record.function_name)?;
                    writeln!(out, "{}", record.math_description)?;
                    for score in &record.variant_scores {
                        writeln!(
                            out,
                            "  {:<24} {}",
                            score.variant_name,
                            deboard_results::format_fitness(score.mean_best_fitness)
                        )?;
                    }
                }
                None => writeln!(
                    out,
                    "No results recorded for {function} ({crossover}/{selection})"
                )?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deboard_gateway::test_mocks::mocks::{MockGateway, http_error};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("deboard").chain(args.iter().copied())).unwrap()
    }

    fn full_submit() -> SubmitArgs {
        SubmitArgs {
            benchmarks: vec!["Sphere Function".into()],
            mutation_schemes: vec!["DE/rand/1".into()],
            crossover_methods: vec!["binomial".into()],
            selection_methods: vec!["greedy".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_submit() {
        let cli = parse(&[
            "submit",
            "--population",
            "12",
            "--benchmark",
            "Sphere Function",
            "--benchmark",
            "Ackley Function",
            "--crossover",
            "exponential",
            "--expand",
        ]);
        let Command::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(args.population.as_deref(), Some("12"));
        assert_eq!(args.benchmarks.len(), 2);
        assert!(args.expand);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_parse_typed_arguments() {
        let cli = parse(&["list", "--sort", "bestFitness", "--order", "desc"]);
        assert!(matches!(
            cli.command,
            Command::List {
                sort: Some(SortKey::BestFitness),
                order: Some(SortDirection::Descending),
                ..
            }
        ));

        let cli = parse(&["analytics", "--crossover", "all", "--no-greedy", "--chart", "line"]);
        let Command::Analytics {
            crossover,
            no_greedy,
            chart,
            ..
        } = cli.command
        else {
            panic!("expected analytics");
        };
        assert_eq!(crossover, CrossoverFilter::All);
        assert!(no_greedy);
        assert_eq!(chart, ChartKind::Line);

        assert!(Cli::try_parse_from(["deboard", "lookup", "uniform", "sts", "sphere"]).is_err());
    }

    #[test]
    fn test_global_options() {
        let cli = parse(&["logout", "--api-url", "http://backend:9000/api/"]);
        assert_eq!(cli.api_base_url().unwrap(), "http://backend:9000/api");

        let bad = parse(&["--api-url", "backend", "logout"]);
        assert!(matches!(bad.api_base_url(), Err(DashboardError::Env(_))));
    }

    #[tokio::test]
    async fn test_submit_success() {
        let gateway = Arc::new(MockGateway::new());
        let mut out = Vec::new();
        submit(Arc::clone(&gateway), &full_submit(), &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Confirm Simulation Parameters"));
        assert!(text.contains("Simulation mock-1 started"));
        let sent = gateway.submitted();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].population, 15);
        assert_eq!(sent[0].crossover_methods, vec![CrossoverMethod::Binomial]);
    }

    #[tokio::test]
    async fn test_submit_page_errors_never_reach_gateway() {
        let gateway = Arc::new(MockGateway::new());
        let args = SubmitArgs {
            population: Some("25".into()),
            ..full_submit()
        };
        let mut out = Vec::new();
        let err = submit(Arc::clone(&gateway), &args, &mut out).await.unwrap_err();
        assert!(matches!(err, DashboardError::Wizard(WizardError::InvalidDraft(_))));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Page 1 has errors"));
        assert!(text.contains("Population must be between 10 and 20"));

        let args = SubmitArgs {
            selection_methods: vec![],
            ..full_submit()
        };
        let mut out = Vec::new();
        submit(Arc::clone(&gateway), &args, &mut out).await.unwrap_err();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Page 2 has errors"));
        assert!(text.contains("Please select at least one selection method"));
        assert!(gateway.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_submit_unknown_option() {
        let args = SubmitArgs {
            mutation_schemes: vec!["DE/rand/9".into()],
            ..full_submit()
        };
        let err = submit(Arc::new(MockGateway::new()), &args, &mut Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Wizard(WizardError::UnknownOption { .. })
        ));
    }

    #[tokio::test]
    async fn test_submit_dry_run_and_expand() {
        let gateway = Arc::new(MockGateway::new());
        let args = SubmitArgs {
            expand: true,
            dry_run: true,
            ..full_submit()
        };
        let mut out = Vec::new();
        submit(Arc::clone(&gateway), &args, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[-]"));
        assert!(text.contains("Binomial Crossover"));
        assert!(text.contains("Dry run"));
        assert!(gateway.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_submit_queue_full() {
        let gateway = Arc::new(MockGateway::new());
        gateway.push_submit(Err(http_error(503, None)));
        let mut out = Vec::new();
        let err = submit(gateway, &full_submit(), &mut out).await.unwrap_err();
        assert_eq!(err.to_string(), QUEUE_FULL_MESSAGE);
        assert!(String::from_utf8(out).unwrap().contains(QUEUE_FULL_TITLE));
    }

    #[test]
    fn test_analytics_summary_and_report() {
        let mut out = Vec::new();
        analytics(&AnalyticsView::new(), None, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Sphere Function"));
        assert!(text.contains("STS Selection"));

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("report.html");
        let mut out = Vec::new();
        analytics(&AnalyticsView::new(), Some(&path), &mut out).unwrap();
        assert!(path.is_file());
    }
}
