//! Seed data the dashboard ships with before anything is stored locally.

use chrono::NaiveDate;

use crate::workflows::screening::{
    Discipline, Offer, OfferId, OfferPhase, Project, ProjectId, ProjectStatus,
};

pub(super) fn projects() -> Vec<Project> {
    vec![
        project(
            "p1",
            "IC21709.1",
            "Stadt Hamminkeln – Auf Stemmingholt",
            Discipline::Road,
            "Arne",
            ProjectStatus::InProgress,
            date(2026, 12, 10),
            60,
            (185_000.0, 92_500.0),
            "LP6 erstellen",
        ),
        project(
            "p2",
            "IC22526.1",
            "Ten Brinke – Roederallee",
            Discipline::Road,
            "Arne",
            ProjectStatus::InProgress,
            date(2026, 12, 10),
            55,
            (320_000.0, 160_000.0),
            "LP4 Berichte erstellen",
        ),
        project(
            "p3",
            "IC14019.4",
            "Stadt Gronau – Tieker Hook / Markenfort",
            Discipline::Road,
            "Arne",
            ProjectStatus::Overdue,
            date(2025, 11, 15),
            80,
            (450_000.0, 405_000.0),
            "Planung Lärmschutzwand, wartet auf Stadt",
        ),
        project(
            "p4",
            "IB3401.22_N12",
            "Auswertung KI T4 Gießerei",
            Discipline::Water,
            "David",
            ProjectStatus::Overdue,
            date(2025, 9, 1),
            70,
            (75_000.0, 82_500.0),
            "Überfällig seit 2024",
        ),
        project(
            "p5",
            "IC25107.2",
            "Goldbeck – Bürogebäude Messe Düsseldorf",
            Discipline::Water,
            "Florian",
            ProjectStatus::NotStarted,
            date(2026, 5, 1),
            10,
            (890_000.0, 0.0),
            "Abschluss LP5 und LP6",
        ),
        project(
            "p6",
            "IC32101.1",
            "Oer-Erkenschwick – Kirchstraße & Umfeld",
            Discipline::Water,
            "David",
            ProjectStatus::Waiting,
            date(2026, 2, 1),
            40,
            (210_000.0, 84_000.0),
            "Vergabegespräch bereits erfolgt",
        ),
        project(
            "p7",
            "IB3401.1",
            "Entflechtung Industriefläche",
            Discipline::Remediation,
            "Thomas",
            ProjectStatus::Waiting,
            date(2026, 6, 1),
            35,
            (125_000.0, 37_500.0),
            "Abstimmung mit Umweltamt",
        ),
        project(
            "p8",
            "IC24801.1",
            "Gemeinde Südlohn – Eschlohner Straße",
            Discipline::Road,
            "Max",
            ProjectStatus::InProgress,
            date(2026, 3, 15),
            45,
            (156_000.0, 62_400.0),
            "LP3 in Bearbeitung",
        ),
        project(
            "p9",
            "IC23105.2",
            "Kreis Borken – Radweg K24",
            Discipline::Surveying,
            "Stefan",
            ProjectStatus::Completed,
            date(2025, 12, 1),
            100,
            (48_000.0, 48_000.0),
            "Abgeschlossen und abgerechnet",
        ),
        project(
            "p10",
            "IC25402.1",
            "Stadt Bocholt – Innenstadtring",
            Discipline::Road,
            "Arne",
            ProjectStatus::NotStarted,
            date(2026, 8, 1),
            0,
            (520_000.0, 0.0),
            "Kick-off steht noch aus",
        ),
        project(
            "p11",
            "IB3502.1",
            "Stadtwerke Rhede – Kanalinspektion",
            Discipline::Water,
            "David",
            ProjectStatus::InProgress,
            date(2026, 2, 28),
            65,
            (95_000.0, 71_250.0),
            "Drohnenbefliegung abgeschlossen",
        ),
        project(
            "p12",
            "IC24601.3",
            "Ten Brinke – Logistikzentrum Wesel",
            Discipline::Remediation,
            "Thomas",
            ProjectStatus::InProgress,
            date(2026, 4, 30),
            30,
            (280_000.0, 56_000.0),
            "Entwässerungskonzept in Abstimmung",
        ),
    ]
}

pub(super) fn offers() -> Vec<Offer> {
    vec![
        offer(
            "b1",
            "Ten Brinke",
            "Eitelstraße",
            "Arne",
            OfferPhase::Request,
            date(2026, 3, 1),
            25,
            "Freianlagen und Entwässerung",
        ),
        offer(
            "b2",
            "Knappmann",
            "Parkplatz Düsseldorf Süd",
            "Arne",
            OfferPhase::Analysis,
            date(2026, 2, 15),
            18,
            "Verkehrs- und Entwässerungsplanung",
        ),
        offer(
            "b3",
            "Gemeinde Heiden",
            "Rathausplatz",
            "Max",
            OfferPhase::Preparation,
            date(2026, 4, 1),
            30,
            "LP1–LP6 Planung",
        ),
        offer(
            "b4",
            "PB+C",
            "Neubau Boix Emsbüren",
            "Max",
            OfferPhase::Submission,
            date(2026, 1, 20),
            22,
            "Verkehrsanlagen und Entwässerung",
        ),
        offer(
            "b5",
            "Stadt Leer",
            "Conrebbersweg",
            "Max",
            OfferPhase::Submission,
            date(2025, 12, 31),
            15,
            "LP1–LP3 bis Ende 2025",
        ),
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn project(
    id: &str,
    project_number: &str,
    title: &str,
    discipline: Discipline,
    project_manager: &str,
    status: ProjectStatus,
    deadline: NaiveDate,
    progress: u8,
    (project_volume, invoiced_amount): (f64, f64),
    notes: &str,
) -> Project {
    Project {
        id: ProjectId(id.to_string()),
        project_number: project_number.to_string(),
        title: title.to_string(),
        discipline,
        project_manager: project_manager.to_string(),
        status,
        deadline,
        progress,
        project_volume,
        invoiced_amount,
        notes: Some(notes.to_string()),
    }
}

#[allow(clippy::too_many_arguments)]
fn offer(
    id: &str,
    client: &str,
    title: &str,
    owner: &str,
    phase: OfferPhase,
    due_date: NaiveDate,
    effort_days: u32,
    notes: &str,
) -> Offer {
    Offer {
        id: OfferId(id.to_string()),
        client: client.to_string(),
        title: title.to_string(),
        owner: owner.to_string(),
        phase,
        due_date,
        effort_days,
        notes: Some(notes.to_string()),
    }
}
