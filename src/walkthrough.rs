//! The Afric Froid IIoT platform walkthrough.
//!
//! [`build`] assembles the full document as builder calls; the `walkthrough`
//! binary serializes it to [`DEFAULT_OUTPUT_NAME`].

use crate::ooxml::docx::format::{Alignment, RgbColor};
use crate::ooxml::docx::writer::{
    DocumentProperties, DocumentTree, HeadingOptions, Run, StyleRegistry,
};
use crate::ooxml::error::Result;

/// File name written when no output path is given.
pub const DEFAULT_OUTPUT_NAME: &str = "App_Walkthrough.docx";

pub const DEFAULT_FONT_FAMILY: &str = "Segoe UI";
pub const DEFAULT_FONT_SIZE_PT: f64 = 11.0;

pub const TITLE: &str = "Afric Froid IIoT Platform";
pub const SUBTITLE: &str = "Industrial Digitalization & Real-time Monitoring";

/// Brand dark blue.
pub const BRAND_DARK_BLUE: RgbColor = RgbColor(0, 32, 96);
/// Brand light blue.
pub const BRAND_LIGHT_BLUE: RgbColor = RgbColor(0, 159, 227);

const OBJECTIVE: &str = "The Afric Froid IIoT Platform is a specialized industrial solution designed to bridge the gap between \
operational equipment and digital management. The primary objective is to provide real-time visibility, \
analytical insights, and remote control capabilities for industrial refrigeration and power units, \
ensuring operational efficiency and proactive maintenance.";

const KEY_FEATURES: &[(&str, &str)] = &[
    (
        "Real-time Telemetry Monitoring",
        "Live streaming of critical parameters including Temperature (°C), Suction Pressure (PSI), and Power Usage (kW).",
    ),
    (
        "Interactive Equipment Control",
        "Ability to manage setpoints and power states remotely via secure MQTT communication.",
    ),
    (
        "Dynamic Widget Designer",
        "Advanced administrative tools to customize individual client dashboards with a variety of graphical widgets (Charts, Gauges, Status Indicators).",
    ),
    (
        "Multi-tenant Architecture",
        "Secure user isolation allowing multiple companies to manage their own specific fleet of units.",
    ),
    (
        "Bilingual Interface",
        "Full support for English and French to cater to local and international users.",
    ),
];

const USER_EXPERIENCE: &str = "Upon login, clients are greeted with a customized high-fidelity dashboard. The interface provides \
instant visual feedback on the 'PLC Online' status and live telemetry trends. The 'Controls' section \
enables authorized users to adjust operational parameters with immediate effect on the field equipment.";

const ADMINISTRATIVE_CONTROL: &str = "Administrators have access to a powerful 'Widget Designer'. This interface allows them to drag, drop, \
and configure widgets for any specific user. They can define MQTT topics, JSON extraction paths, \
and visualization types (e.g., Line Charts vs. Gauges), enabling a bespoke monitoring experience for \
different industrial use cases.";

const ARCHITECTURE_INTRO: &str =
    "The platform is built on a modern, scalable stack designed for high availability and low latency:";

const TECH_STACK: &[(&str, &str)] = &[
    (
        "Core Stack",
        "Built with React and TypeScript for a robust, type-safe frontend experience.",
    ),
    (
        "Cloud Infrastructure",
        "Powered by Supabase for secure authentication and real-time database management.",
    ),
    (
        "Connectivity Layer",
        "Utilizes the MQTT protocol, the industry standard for IoT, to ensure lightweight and reliable messaging between the web platform and industrial PLCs.",
    ),
    (
        "UI Framework",
        "Custom-styled using Vanilla CSS and Tailwind for a premium, responsive industrial aesthetic.",
    ),
];

const CONCLUSION: &str = "The Afric Froid IIoT Platform represents a significant step forward in industrial monitoring. By \
combining real-time connectivity with a highly flexible user interface, it provides the tools \
necessary for modern industrial teams to optimize their operations and maintain peak performance.";

/// Build the complete walkthrough document.
pub fn build() -> Result<DocumentTree> {
    let registry = StyleRegistry::new(DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PT)?;
    let properties = DocumentProperties::new()
        .with_title(TITLE)
        .with_subject(SUBTITLE)
        .with_creator("Afric Froid");
    let mut tree = DocumentTree::new(registry).with_properties(properties);

    add_title_page(&mut tree)?;

    tree.add_heading("1. Project Objective", 1, HeadingOptions::new())?;
    body(&mut tree, OBJECTIVE)?;

    tree.add_heading("2. Key Features", 1, HeadingOptions::new())?;
    add_bullets(&mut tree, KEY_FEATURES)?;

    tree.add_heading("3. Operational Walkthrough", 1, HeadingOptions::new())?;
    tree.add_heading("3.1 User Experience", 2, HeadingOptions::new())?;
    body(&mut tree, USER_EXPERIENCE)?;
    tree.add_heading("3.2 Administrative Control", 2, HeadingOptions::new())?;
    body(&mut tree, ADMINISTRATIVE_CONTROL)?;

    tree.add_heading("4. Technical Architecture", 1, HeadingOptions::new())?;
    body(&mut tree, ARCHITECTURE_INTRO)?;
    add_bullets(&mut tree, TECH_STACK)?;

    tree.add_heading("5. Conclusion", 1, HeadingOptions::new())?;
    body(&mut tree, CONCLUSION)?;

    Ok(tree)
}

/// Centered title and subtitle, then a page break.
fn add_title_page(tree: &mut DocumentTree) -> Result<()> {
    tree.add_heading(
        TITLE,
        1,
        HeadingOptions::new()
            .with_alignment(Alignment::Center)
            .with_bold(true)
            .with_size(28.0)
            .with_color(BRAND_DARK_BLUE),
    )?;
    tree.add_heading(
        SUBTITLE,
        2,
        HeadingOptions::new()
            .with_alignment(Alignment::Center)
            .with_bold(false)
            .with_size(16.0)
            .with_color(BRAND_LIGHT_BLUE),
    )?;
    tree.add_page_break();
    Ok(())
}

fn body(tree: &mut DocumentTree, text: &str) -> Result<()> {
    tree.add_paragraph(vec![Run::new(text)], Alignment::Start)?;
    Ok(())
}

/// One "Title: description" bullet per entry, the title run bold.
fn add_bullets(tree: &mut DocumentTree, entries: &[(&str, &str)]) -> Result<()> {
    for (title, description) in entries {
        tree.add_list_item(
            Run::new(format!("{}: ", title)).bold(true),
            vec![Run::new(*description)],
        )?;
    }
    Ok(())
}
