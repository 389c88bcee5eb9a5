use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;

use crate::listing::csv_io::{read_rows, write_rows};
use crate::listing::{HrContact, JobListing};
use crate::output::types::Meta;
use crate::telemetry::{self};
use crate::telemetry::ops::merge::Phase as MergePhase;

pub mod join;
pub mod types;

use join::JoinHow;

#[derive(Args)]
pub struct MergeCmd {
    /// Cleaned listings CSV
    pub listings: PathBuf,
    /// HR contact list (CSV export; common header spellings accepted)
    #[arg(long)] pub contacts: PathBuf,
    #[arg(long, value_enum, default_value_t=JoinHow::Left)] pub how: JoinHow,
    #[arg(short, long, default_value = "jobs_merged.csv")] pub output: PathBuf,
    #[arg(long, default_value_t=false)] pub apply: bool,
}

pub async fn run(args: MergeCmd) -> Result<()> {
    let log = telemetry::merge();
    let _g = log.root_span_kv([
        ("apply", args.apply.to_string()),
        ("listings", args.listings.display().to_string()),
        ("contacts", args.contacts.display().to_string()),
        ("how", format!("{:?}", args.how)),
    ]).entered();

    let (listings, contacts) = {
        let _s = log.span(&MergePhase::Read).entered();
        let listings: Vec<JobListing> = read_rows(&args.listings)?;
        let contacts: Vec<HrContact> = read_rows(&args.contacts)?;
        (listings, contacts)
    };

    if !args.apply {
        let _s = log.span(&MergePhase::Plan).entered();
        let companies = join::index_contacts(&contacts).len();
        if crate::output::config::envelope_requested() {
            use types::MergePlan;
            let plan = MergePlan {
                listings: listings.len(),
                contacts: contacts.len(),
                companies_with_contacts: companies,
                how: args.how,
                output: args.output.display().to_string(),
            };
            log.plan(&plan)?;
        } else {
            log.info(format!("📝 Merge plan — listings={} contacts={} companies={} how={:?} output={}",
                listings.len(), contacts.len(), companies, args.how, args.output.display()));
            log.info("   Use --apply to execute.");
        }
        return Ok(());
    }

    let started = Instant::now();
    let (rows, report) = {
        let _s = log.span(&MergePhase::Join).entered();
        join::merge(&listings, &contacts, args.how)
    };
    {
        let _s = log.span_kv(&MergePhase::Write, [("rows", rows.len().to_string())]).entered();
        write_rows(&args.output, &rows)?;
    }

    if report.contacts > 0 && report.matched_listings == 0 {
        log.warn("no listing matched any contact company");
    }
    if crate::output::config::envelope_requested() {
        log.result_with_meta(&report, Meta::finished(started, &args.output))?;
    } else {
        log.info(format!("🔗 merged listings={} contacts={} matched={} rows={} → {}",
            report.listings, report.contacts, report.matched_listings, report.rows_out, args.output.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::csv_io::temp_path;

    #[tokio::test]
    async fn writes_hr_columns() {
        let listings = temp_path("listings.csv");
        let contacts = temp_path("contacts.csv");
        let out = temp_path("merged.csv");
        std::fs::write(&listings, "source,title,company,link\nnaukri,Rust Dev,Acme Pvt Ltd,https://x.io/1\nshine,Go Dev,Beta,https://x.io/2\n").unwrap();
        std::fs::write(&contacts, "Name,Email,Company Name,Designation\nAsha,asha@acme.io,ACME Private Limited,Talent Lead\n").unwrap();

        run(MergeCmd { listings: listings.clone(), contacts: contacts.clone(), how: JoinHow::Inner, output: out.clone(), apply: true })
            .await
            .unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "source,title,company,link,experience,salary,date_posted,location,work_type,summary,hr_name,hr_email,hr_title,hr_seniority,hr_phone,hr_linkedin");
        assert_eq!(lines.next().unwrap(), "naukri,Rust Dev,Acme Pvt Ltd,https://x.io/1,,,,,,,Asha,asha@acme.io,Talent Lead,,,");
        assert!(lines.next().is_none());
        for p in [listings, contacts, out] { let _ = std::fs::remove_file(p); }
    }
}
