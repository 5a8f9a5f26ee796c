//! Demo marketplace: four hiring companies with one open posting each, one
//! laborer with reviews, and an ongoing conversation.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::listings::wage::Wage;
use crate::models::chat::Conversation;
use crate::models::job::{JobPosting, JobType, PostingStatus, Skill};
use crate::models::user::{BusinessType, ExperienceLevel, HirerProfile, LaborerProfile, Review};
use crate::store::MarketplaceStore;

/// Ids of the seeded accounts, used to hand out demo sessions at startup.
#[derive(Debug, Clone, Copy)]
pub struct DemoAccounts {
    pub laborer_id: Uuid,
    pub hirer_id: Uuid,
}

pub fn sample_hirers(now: DateTime<Utc>) -> Vec<HirerProfile> {
    let hirer = |company: &str, contact: &str, email: &str, location: &str, kind, description: &str| {
        HirerProfile {
            id: Uuid::new_v4(),
            company_name: company.to_string(),
            contact_person: contact.to_string(),
            email: email.to_string(),
            phone: "(555) 987-6543".to_string(),
            location: location.to_string(),
            business_type: kind,
            description: description.to_string(),
            created_at: now,
        }
    };

    vec![
        hirer(
            "BuildCorp LLC",
            "Sarah Johnson",
            "sarah@buildcorp.com",
            "New York, NY",
            BusinessType::ConstructionCompany,
            "Leading construction company specializing in commercial and residential projects.",
        ),
        hirer(
            "Metro Plumbing Services",
            "Dave Ortiz",
            "dave@metroplumbing.com",
            "Brooklyn, NY",
            BusinessType::GeneralContractor,
            "Residential and commercial plumbing across the five boroughs.",
        ),
        hirer(
            "Green Spaces Inc",
            "Lena Park",
            "lena@greenspaces.com",
            "Queens, NY",
            BusinessType::Landscaping,
            "Seasonal landscaping and garden maintenance.",
        ),
        hirer(
            "PowerTech Solutions",
            "Marcus Reed",
            "marcus@powertech.com",
            "Manhattan, NY",
            BusinessType::GeneralContractor,
            "Commercial electrical maintenance and installations.",
        ),
    ]
}

/// One active posting per hirer, in `hirers` order. Expects the four
/// companies returned by [`sample_hirers`].
pub fn sample_jobs(hirers: &[HirerProfile], now: DateTime<Utc>) -> Vec<JobPosting> {
    struct Template {
        title: &'static str,
        wage: &'static str,
        job_type: JobType,
        posted_ago: Duration,
        deadline_in_days: i64,
        description: &'static str,
        skills: &'static [Skill],
        benefits: &'static [&'static str],
    }

    let templates = [
        Template {
            title: "Construction Worker - Downtown Project",
            wage: "$25/hour",
            job_type: JobType::FullTime,
            posted_ago: Duration::days(2),
            deadline_in_days: 14,
            description: "Looking for experienced construction workers for a major downtown development project. Must have experience with concrete work and steel framing.",
            skills: &[Skill::Construction, Skill::GeneralLabor],
            benefits: &["Health Insurance", "Paid Time Off", "Safety Training"],
        },
        Template {
            title: "Experienced Plumber Needed",
            wage: "$30-35/hour",
            job_type: JobType::Contract,
            posted_ago: Duration::days(1),
            deadline_in_days: 19,
            description: "Seeking skilled plumber for residential and commercial projects. Must have valid license and 3+ years experience.",
            skills: &[Skill::Plumbing, Skill::Hvac],
            benefits: &["Flexible Schedule", "Tool Allowance", "Performance Bonus"],
        },
        Template {
            title: "Landscaping Crew Member",
            wage: "$18-22/hour",
            job_type: JobType::PartTime,
            posted_ago: Duration::hours(3),
            deadline_in_days: 24,
            description: "Join our landscaping team for seasonal work including lawn care, tree trimming, and garden maintenance.",
            skills: &[Skill::Landscaping, Skill::GeneralLabor],
            benefits: &["Outdoor Work", "Team Environment", "Growth Opportunities"],
        },
        Template {
            title: "Electrical Technician",
            wage: "$28-32/hour",
            job_type: JobType::FullTime,
            posted_ago: Duration::weeks(1),
            deadline_in_days: 17,
            description: "Electrical technician needed for commercial building maintenance and installations. Must have electrical license.",
            skills: &[Skill::Electrical],
            benefits: &["Health Insurance", "401k", "Training Programs"],
        },
    ];

    hirers
        .iter()
        .zip(templates)
        .map(|(hirer, t)| JobPosting {
            id: Uuid::new_v4(),
            hirer_id: hirer.id,
            title: t.title.to_string(),
            company: hirer.company_name.clone(),
            location: hirer.location.clone(),
            description: t.description.to_string(),
            wage: Wage::parse(t.wage),
            job_type: t.job_type,
            posted_at: now - t.posted_ago,
            deadline: (now + Duration::days(t.deadline_in_days)).date_naive(),
            skills: t.skills.iter().copied().collect::<BTreeSet<_>>(),
            benefits: t.benefits.iter().map(|b| b.to_string()).collect(),
            urgency: None,
            status: PostingStatus::Active,
        })
        .collect()
}

pub fn sample_laborer(now: DateTime<Utc>) -> LaborerProfile {
    LaborerProfile {
        id: Uuid::new_v4(),
        full_name: "John Smith".to_string(),
        email: "john.smith@email.com".to_string(),
        phone: "(555) 123-4567".to_string(),
        location: "New York, NY".to_string(),
        skills: BTreeSet::from([Skill::Construction, Skill::GeneralLabor]),
        experience_level: ExperienceLevel::Experienced,
        bio: "Experienced construction worker with 8 years in the industry. Specialized in concrete work, steel framing, and safety procedures.".to_string(),
        created_at: now,
    }
}

/// Fills `store` with the demo marketplace.
pub fn seed(store: &mut MarketplaceStore, now: DateTime<Utc>) -> DemoAccounts {
    let hirers = sample_hirers(now);
    let jobs = sample_jobs(&hirers, now);
    let laborer = sample_laborer(now);
    let buildcorp = &hirers[0];

    let reviews = [
        (5, "Professional, punctual, and skilled. Highly recommend!", "Downtown Office Building"),
        (5, "Outstanding work quality and great attention to detail.", "Residential Complex"),
        (4, "Reliable and hardworking. Completed the project on time.", "Warehouse Renovation"),
    ];
    for (weeks_ago, (rating, comment, project)) in (1i64..).zip(reviews) {
        store.reviews.push(Review {
            id: Uuid::new_v4(),
            laborer_id: laborer.id,
            reviewer_id: buildcorp.id,
            reviewer_name: buildcorp.company_name.clone(),
            rating,
            comment: comment.to_string(),
            project: Some(project.to_string()),
            created_at: now - Duration::weeks(weeks_ago * 4),
        });
    }

    let mut conversation = Conversation::new(laborer.id, buildcorp.id, now - Duration::minutes(30));
    let thread = [
        (buildcorp.id, "Hi! We reviewed your application for the construction worker position."),
        (laborer.id, "Thank you for considering my application. I'm very interested in the position."),
        (buildcorp.id, "Great! Can you tell me about your experience with concrete work?"),
        (laborer.id, "I have 5 years of experience with concrete work, including foundations and driveways."),
    ];
    let sent_minutes_ago = [20, 18, 15, 13];
    for ((sender, content), minutes_ago) in thread.into_iter().zip(sent_minutes_ago) {
        conversation.push(sender, content.to_string(), now - Duration::minutes(minutes_ago));
    }
    conversation.mark_read(laborer.id);
    conversation.mark_read(buildcorp.id);
    conversation.push(
        buildcorp.id,
        "When can you start the construction project?".to_string(),
        now - Duration::minutes(2),
    );

    let accounts = DemoAccounts {
        laborer_id: laborer.id,
        hirer_id: buildcorp.id,
    };

    store.jobs.extend(jobs);
    store.laborers.insert(laborer.id, laborer);
    for hirer in hirers {
        store.hirers.insert(hirer.id, hirer);
    }
    store.conversations.push(conversation);
    accounts
}
