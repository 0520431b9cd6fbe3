// ABOUTME: Curated example leads covering every pipeline stage
// ABOUTME: Used by the seed source and as the fallback set when loading fails

use chrono::{DateTime, Duration, Utc};
use leadstage_core::{Lead, Stage, StageHistoryEntry, StageSource};

const ADDED_TO_CAMPAIGN: &str = "Lead added to campaign";
const FIRST_MESSAGE_SENT: &str = "First message sent";

struct Campaign {
    id: u64,
    name: &'static str,
}

const Q4_OUTREACH: Campaign = Campaign {
    id: 1,
    name: "Q4 Outreach",
};
const PRODUCT_LAUNCH: Campaign = Campaign {
    id: 2,
    name: "Product Launch",
};
const FOLLOW_UP_SEQUENCE: Campaign = Campaign {
    id: 3,
    name: "Follow-up Sequence",
};

fn entry(stage: Stage, at: DateTime<Utc>, reason: &str) -> StageHistoryEntry {
    StageHistoryEntry {
        stage,
        source: StageSource::Ai,
        timestamp: at,
        reason: Some(reason.to_string()),
    }
}

fn profile(
    id: u64,
    name: &str,
    headline: &str,
    campaign: &Campaign,
    added: DateTime<Utc>,
) -> Lead {
    let slug = name.to_lowercase().replace(' ', "-");
    let mut lead = Lead::new(id, name)
        .with_headline(headline)
        .with_campaign(campaign.id, campaign.name)
        .with_created_at(added);
    lead.linkedin_url = Some(format!("https://linkedin.com/in/{}", slug));
    lead
}

/// The twelve example leads, two per stage, with timestamps relative to `now`
pub fn example_leads(now: DateTime<Utc>) -> Vec<Lead> {
    let days_ago = |days: i64| now - Duration::days(days);
    let reason = |text: &str| Some(text.to_string());

    vec![
        profile(1, "Bryan Bayless", "VP, Revenue Center of Excellence", &Q4_OUTREACH, days_ago(2))
            .with_emails(["bayless.b@excellence.io"])
            .with_location("Portland")
            .with_company("Excellence")
            .with_stage(
                Stage::New,
                StageSource::Ai,
                days_ago(2),
                reason("Lead was recently added to campaign. No outreach has been sent yet."),
            ),
        profile(2, "David Pierce", "Director - US Sales at POWWR", &PRODUCT_LAUNCH, days_ago(7))
            .with_emails(["pdavidpierce@gmail.com"])
            .with_location("Houston")
            .with_company("POWWR")
            .with_stage(
                Stage::New,
                StageSource::Ai,
                days_ago(7),
                reason("Lead imported from LinkedIn Sales Navigator. Awaiting campaign start."),
            ),
        profile(3, "Hannah Turner", "CMO at SecureFrame", &Q4_OUTREACH, days_ago(10))
            .with_emails(["antar.work.acc@gmail.com", "hannah.t@secureframe.com"])
            .with_location("United States")
            .with_company("SecureFrame")
            .with_stage(
                Stage::Contacted,
                StageSource::Ai,
                days_ago(3),
                reason("First outreach message was sent via LinkedIn. Connection request \
                    accepted, awaiting response."),
            )
            .with_activity(2, 0, Some(days_ago(3)), None)
            .with_history(vec![entry(Stage::New, days_ago(10), ADDED_TO_CAMPAIGN)]),
        profile(4, "Will Anastas", "SVP of Sales", &FOLLOW_UP_SEQUENCE, days_ago(13))
            .with_location("San Francisco")
            .with_stage(
                Stage::Contacted,
                StageSource::Ai,
                days_ago(5),
                reason("LinkedIn connection request sent. Email not found - consider using email \
                    finder."),
            )
            .with_activity(1, 0, Some(days_ago(5)), None)
            .with_history(vec![entry(Stage::New, days_ago(13), ADDED_TO_CAMPAIGN)]),
        profile(5, "Joe Kvidera", "Vice President of Sales", &Q4_OUTREACH, days_ago(13))
            .with_emails(["joe.kvidera@gmail.com"])
            .with_location("United States")
            .with_stage(
                Stage::Engaged,
                StageSource::Ai,
                days_ago(1),
                reason("Lead replied with interest! Asked about pricing and demo availability. \
                    High engagement signal detected."),
            )
            .with_activity(3, 2, Some(days_ago(1)), Some(days_ago(1)))
            .with_history(vec![
                entry(Stage::New, days_ago(13), ADDED_TO_CAMPAIGN),
                entry(Stage::Contacted, days_ago(10), FIRST_MESSAGE_SENT),
            ]),
        profile(
            6,
            "Jerry Recht",
            "Sales & Business Development Executive",
            &PRODUCT_LAUNCH,
            days_ago(14),
        )
            .with_emails(["jrrecht@msn.com"])
            .with_location("United States")
            .with_stage(Stage::Engaged, StageSource::Manual, days_ago(2), None)
            .with_activity(4, 3, Some(days_ago(2)), Some(days_ago(2)))
            .with_history(vec![
                entry(Stage::New, days_ago(14), ADDED_TO_CAMPAIGN),
                entry(Stage::Contacted, days_ago(12), FIRST_MESSAGE_SENT),
            ]),
        profile(
            7,
            "Sanjay Malhotra",
            "CEO at Mi Analyst | Transforming Industry",
            &Q4_OUTREACH,
            days_ago(20),
        )
            .with_emails(["smalhotra.to@gmail.com"])
            .with_location("Canada")
            .with_company("Mi Analyst")
            .with_stage(
                Stage::Ghosted,
                StageSource::Ai,
                days_ago(1),
                reason("No reply after 4 follow-up attempts over 16 days. Lead initially showed \
                    interest but went silent."),
            )
            .with_activity(5, 1, Some(days_ago(3)), Some(days_ago(14)))
            .with_history(vec![
                entry(Stage::New, days_ago(20), ADDED_TO_CAMPAIGN),
                entry(Stage::Contacted, days_ago(18), FIRST_MESSAGE_SENT),
                entry(Stage::Engaged, days_ago(14), "Positive reply received"),
            ]),
        profile(8, "Robert Novena", "Founder, Creative Director", &FOLLOW_UP_SEQUENCE, days_ago(16))
            .with_emails(Vec::<String>::new())
            .with_location("Windsor")
            .with_stage(
                Stage::Ghosted,
                StageSource::Ai,
                days_ago(2),
                reason("No reply after 3 LinkedIn messages over 12 days. Email not available for \
                    alternative outreach."),
            )
            .with_activity(3, 0, Some(days_ago(4)), None)
            .with_history(vec![
                entry(Stage::New, days_ago(16), ADDED_TO_CAMPAIGN),
                entry(Stage::Contacted, days_ago(14), FIRST_MESSAGE_SENT),
            ]),
        profile(
            9,
            "Bryan Held",
            "Sales & Marketing for Growth in Enterprise",
            &PRODUCT_LAUNCH,
            days_ago(14),
        )
            .with_emails(["bheld6@gmail.com"])
            .with_location("Slinger")
            .with_stage(
                Stage::NotInterested,
                StageSource::Ai,
                days_ago(3),
                reason("Lead explicitly declined: \"Thanks but we already have a solution in \
                    place. Not interested at this time.\""),
            )
            .with_activity(2, 1, Some(days_ago(5)), Some(days_ago(3)))
            .with_history(vec![
                entry(Stage::New, days_ago(14), ADDED_TO_CAMPAIGN),
                entry(Stage::Contacted, days_ago(12), FIRST_MESSAGE_SENT),
            ]),
        profile(
            10,
            "Gregory Watford",
            "Business Account Executive at Specialized Solutions",
            &Q4_OUTREACH,
            days_ago(20),
        )
            .with_emails(["gregwatford@cox.net"])
            .with_location("Baton Rouge Metropolitan Area")
            .with_company("Specialized Solutions")
            .with_stage(
                Stage::NotInterested,
                StageSource::Ai,
                days_ago(4),
                reason("Negative sentiment detected in reply. Lead requested to be removed from \
                    outreach list."),
            )
            .with_activity(3, 1, Some(days_ago(6)), Some(days_ago(4)))
            .with_history(vec![
                entry(Stage::New, days_ago(20), ADDED_TO_CAMPAIGN),
                entry(Stage::Contacted, days_ago(18), FIRST_MESSAGE_SENT),
            ]),
        profile(
            11,
            "Sarah Johnson",
            "Chief Revenue Officer at TechCorp",
            &Q4_OUTREACH,
            days_ago(30),
        )
            .with_emails(["s.johnson@techcorp.com"])
            .with_location("New York")
            .with_company("TechCorp")
            .with_stage(Stage::Excluded, StageSource::Manual, days_ago(5), None)
            .with_history(vec![entry(Stage::New, days_ago(30), ADDED_TO_CAMPAIGN)]),
        profile(
            12,
            "Michael Chen",
            "VP of Partnerships at Competitor Inc.",
            &PRODUCT_LAUNCH,
            days_ago(25),
        )
            .with_emails(["m.chen@competitor.com"])
            .with_location("Los Angeles")
            .with_company("Competitor Inc.")
            .with_stage(Stage::Excluded, StageSource::Manual, days_ago(10), None)
            .with_history(vec![entry(Stage::New, days_ago(25), ADDED_TO_CAMPAIGN)]),
    ]
}
