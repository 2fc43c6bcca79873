use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use job_board::accounts::{AccountId, ApplicantSignUp, CompanySignUp};
use job_board::applications::{write_csv, ApplicationStatus, TransitionPolicy};
use job_board::config::BoardConfig;
use job_board::error::AppError;
use job_board::jobs::{enrich, filter_by_type, JobDetails, JobId, JobType};
use job_board::saved::SavedJobChange;

use crate::infra::BoardServices;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Allow any status change instead of the forward-only review flow
    #[arg(long)]
    pub(crate) permissive: bool,
    /// Only list postings of this job type (e.g. "Intern", "Full Time")
    #[arg(long, value_parser = parse_job_type)]
    pub(crate) job_type: Option<JobType>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ExportArgs {
    /// Write the CSV to this file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

fn parse_job_type(raw: &str) -> Result<JobType, String> {
    JobType::parse(raw).ok_or_else(|| format!("unknown job type '{raw}'"))
}

/// Seeded board used by the demo and export commands.
pub(crate) struct DemoBoard {
    pub(crate) services: BoardServices,
    pub(crate) company: AccountId,
    pub(crate) applicants: Vec<AccountId>,
    pub(crate) jobs: Vec<JobId>,
}

pub(crate) fn seed_demo_board(policy: TransitionPolicy) -> Result<DemoBoard, AppError> {
    let services = BoardServices::build(&BoardConfig {
        status_policy: policy,
        saved_jobs_path: None,
    });

    let company = services.auth.sign_up_company(CompanySignUp {
        name: "Northwind Labs".to_string(),
        email: "talent@northwind.example".to_string(),
        password: "northwind".to_string(),
        confirm_password: "northwind".to_string(),
        website: "https://northwind.example".to_string(),
        phone: "+1 555 0100".to_string(),
        industry: "Logistics software".to_string(),
        linkedin: String::new(),
    })?;

    let mut applicants = Vec::new();
    for (name, email) in [
        ("Ada Lovelace", "ada@example.com"),
        ("Alan Turing", "alan@example.com"),
    ] {
        let session = services.auth.sign_up_applicant(ApplicantSignUp {
            name: name.to_string(),
            email: email.to_string(),
            password: "engines1843".to_string(),
            confirm_password: "engines1843".to_string(),
            phone: String::new(),
            linkedin: String::new(),
            cv_link: format!("https://cv.example.com/{email}"),
        })?;
        applicants.push(session.account_id);
    }

    let mut jobs = Vec::new();
    for (title, job_type) in [
        ("Backend Engineer", JobType::FullTime),
        ("Data Intern", JobType::Intern),
        ("", JobType::PartTime),
    ] {
        let job_id = services.catalog.create_job(
            &company.account_id,
            JobDetails {
                title: title.to_string(),
                location: "Rotterdam".to_string(),
                salary: "Competitive".to_string(),
                description: format!("{title} at Northwind Labs"),
                responsibilities: "Ship and operate routing services".to_string(),
                requirements: "Curiosity".to_string(),
                job_type,
            },
        )?;
        jobs.push(job_id);
    }

    for applicant in &applicants {
        services
            .tracker
            .apply_with_profile(&company.account_id, &jobs[0], applicant)?;
    }
    services.tracker.update_status(
        &company.account_id,
        &jobs[0],
        &applicants[0],
        ApplicationStatus::Reviewed,
    )?;
    services.tracker.update_status(
        &company.account_id,
        &jobs[0],
        &applicants[1],
        ApplicationStatus::Rejected,
    )?;

    Ok(DemoBoard {
        services,
        company: company.account_id,
        applicants,
        jobs,
    })
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let policy = if args.permissive {
        TransitionPolicy::Permissive
    } else {
        TransitionPolicy::Strict
    };
    let board = seed_demo_board(policy)?;
    let services = &board.services;

    println!("Job board demo ({policy:?} status policy)");

    let companies = services.directory.list_companies()?;
    let listings = enrich(
        filter_by_type(services.catalog.list_all_jobs()?, args.job_type),
        &companies,
    );
    println!("\nOpen positions ({}):", listings.len());
    for listing in &listings {
        println!(
            "  - [{}] {} @ {} ({}, {})",
            listing.id, listing.title, listing.company, listing.location, listing.job_type
        );
    }

    let backend = &board.jobs[0];
    println!("\nApplications for {backend}:");
    for application in services.tracker.list_for_job(&board.company, backend)? {
        println!(
            "  - {} <{}> -> {}",
            application.snapshot.name,
            application.snapshot.email,
            application.status.label()
        );
    }

    let repeat = services
        .tracker
        .apply_with_profile(&board.company, backend, &board.applicants[0])?;
    println!(
        "\nRe-applying as {} keeps the first record: created={} status={}",
        board.applicants[0],
        repeat.is_created(),
        repeat.application().status.label()
    );

    match services.tracker.update_status(
        &board.company,
        backend,
        &board.applicants[1],
        ApplicationStatus::Accepted,
    ) {
        Ok(application) => println!("Rejected applicant moved to {}", application.status.label()),
        Err(err) => println!("Status change refused: {}", err.user_message()),
    }

    let saved = services.saved.for_applicant(&board.applicants[0])?;
    let feed = saved.list();
    let intern = &board.jobs[1];
    for _ in 0..2 {
        match saved.toggle(intern)? {
            SavedJobChange::Saved { job } => {
                println!("\nSaved '{}' at {} for later", job.title, job.company)
            }
            SavedJobChange::Removed { job_id } => println!("Removed {job_id} from saved jobs"),
        }
        println!("  saved jobs now: {}", feed.current().len());
    }

    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let board = seed_demo_board(TransitionPolicy::Strict)?;
    let applications = board
        .services
        .tracker
        .list_for_job(&board.company, &board.jobs[0])?;

    match args.output {
        Some(path) => {
            let file = File::create(&path)?;
            write_csv(&applications, file)?;
            println!(
                "Exported {} applications to {}",
                applications.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_csv(&applications, &mut handle)?;
            handle.flush()?;
        }
    }
    Ok(())
}
