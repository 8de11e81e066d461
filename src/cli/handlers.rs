use chrono::{DateTime, Utc};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::prefs;
use crate::io::script;
use crate::io::seed::{self, SeedSource};
use crate::io::session;
use crate::model::config::PulseConfig;
use crate::model::role::ThemeMode;
use crate::model::state::AppState;
use crate::ops::action;
use crate::ops::derive;

/// Shared inputs every command builds its state from
struct Context {
    config: PulseConfig,
    seed: Box<dyn SeedSource>,
    now: DateTime<Utc>,
    json: bool,
}

impl Context {
    fn new(cli: &Cli, config: PulseConfig) -> Self {
        let seed_file = cli.seed.as_deref().or(config.seed.file.as_deref());
        Context {
            seed: seed::source_for(seed_file),
            now: cli.now.unwrap_or_else(Utc::now),
            json: cli.json,
            config,
        }
    }

    fn load_state(&self) -> Result<AppState, Box<dyn std::error::Error>> {
        let store = prefs::open_configured(&self.config.prefs);
        let theme = prefs::load_theme(store.as_ref());
        Ok(session::initial_state(
            &self.config.session,
            self.seed.as_ref(),
            theme,
            self.now,
        )?)
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: PulseConfig) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::new(&cli, config);
    match cli.command {
        None => Err("no command given (run `pulse` without arguments for the dashboard)".into()),
        Some(cmd) => match cmd {
            Commands::Summary => cmd_summary(&ctx),
            Commands::Members(args) => cmd_members(&ctx, args),
            Commands::Tasks(args) => cmd_tasks(&ctx, args),
            Commands::Replay(args) => cmd_replay(&ctx, args),
            Commands::Seed => cmd_seed(&ctx),
            Commands::Theme(args) => cmd_theme(&ctx, args),
        },
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_summary(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let state = ctx.load_state()?;
    print_summary(&state, ctx.json)
}

fn print_summary(state: &AppState, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let status = derive::distribution(&derive::status_tally(&state.members.members));
    let roster = derive::distribution(&derive::roster_tally(&state.team_management.members));
    let nav = derive::nav_counts(state);

    if json {
        let out = SummaryJson {
            members: state.members.members.len(),
            status: shares_to_json(&status),
            roster: shares_to_json(&roster),
            nav: nav_to_json(&nav),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Team status ({} members)", state.members.members.len());
    for line in format_distribution(&status) {
        println!("{}", line);
    }
    println!();
    println!("Roster ({} members)", state.team_management.members.len());
    for line in format_distribution(&roster) {
        println!("{}", line);
    }
    println!();
    println!("Overview");
    for line in format_nav_counts(&nav) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_members(ctx: &Context, args: MembersArgs) -> Result<(), Box<dyn std::error::Error>> {
    let state = ctx.load_state()?;
    let list = derive::member_listing(
        &state.members.members,
        args.status,
        args.sort == SortOrder::Active,
    );

    if ctx.json {
        let out: Vec<MemberJson> = list.iter().map(|m| member_to_json(m)).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if list.is_empty() {
        println!("No members found");
        return Ok(());
    }
    for m in list {
        println!("{}", format_member_line(m));
    }
    Ok(())
}

fn cmd_tasks(ctx: &Context, args: TasksArgs) -> Result<(), Box<dyn std::error::Error>> {
    let state = ctx.load_state()?;
    let member = state
        .members
        .find(&args.member)
        .ok_or_else(|| format!("member not found: {}", args.member))?;

    if ctx.json {
        let out = MemberTasksJson {
            member: member.id.clone(),
            tasks: member
                .tasks
                .iter()
                .map(|t| task_to_json(t, ctx.now))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let summary = derive::member_task_summary(member);
    println!(
        "{} ({})  {} active, {} done",
        member.name, member.status, summary.active, summary.done
    );
    if member.tasks.is_empty() {
        println!("No tasks assigned");
    }
    for task in &member.tasks {
        println!("{}", format_task_line(task, ctx.now));
    }
    Ok(())
}

fn cmd_seed(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let members = seed::members_from_profiles(ctx.seed.fetch()?, ctx.now);
    println!("{}", serde_json::to_string_pretty(&members)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_replay(ctx: &Context, args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let actions = script::read_script(&args.script)?;
    let mut state = ctx.load_state()?;
    for act in actions {
        if let Some(id) = action::dispatch(&mut state, act, ctx.now) {
            tracing::debug!(id = %id, "created");
        }
    }

    if args.summary {
        return print_summary(&state, ctx.json);
    }
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

fn cmd_theme(ctx: &Context, args: ThemeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = prefs::open_configured(&ctx.config.prefs);
    let current = prefs::load_theme(store.as_ref()).unwrap_or_default();
    let Some(choice) = args.value else {
        println!("{}", current.as_str());
        return Ok(());
    };

    let next = match choice {
        ThemeChoice::Light => ThemeMode::Light,
        ThemeChoice::Dark => ThemeMode::Dark,
        ThemeChoice::Toggle => current.toggled(),
    };
    prefs::save_theme(store.as_mut(), next)?;
    println!("{}", next.as_str());
    Ok(())
}
