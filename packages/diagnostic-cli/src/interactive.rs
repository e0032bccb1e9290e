//! Interactive mode: one menu per step, one prompt per field.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use diagnostic::{
    EnvironmentalSystem, Field, FieldKind, IdType, MapViewport, OrganizationKind,
    SubmissionPayload, WizardEvent, WizardSession, WizardState, WizardView,
};

use crate::context::{AppContext, Tone};
use crate::deliver::PendingSubmission;

/// Entries of the step menu besides the fields themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Edit(Field),
    Next,
    Back,
    Submit,
    Quit,
}

/// Run the wizard until it is submitted or the user quits.
///
/// Returns the payload on submission, `None` when the user quits.
pub fn run(ctx: &AppContext) -> Result<Option<SubmissionPayload>> {
    let mut session = WizardSession::new(PendingSubmission::default());

    loop {
        let view = session.view();
        if view.state.is_terminal() {
            break;
        }

        print_step(ctx, &view);

        let actions = actions_for(&view);
        let items: Vec<String> = actions.iter().map(|a| menu_label(&view, *a)).collect();
        let selection = Select::with_theme(&ctx.theme)
            .with_prompt("Choose a field to edit or an action")
            .items(&items)
            .default(0)
            .interact()?;

        let event = match actions[selection] {
            Action::Edit(field) => prompt_field(ctx, &view, field)?,
            Action::Next => Some(WizardEvent::Advance),
            Action::Back => Some(WizardEvent::Back),
            action => {
                let (prompt, default) = confirmation(action);
                match resolve(action, ctx.confirm(prompt, default)?) {
                    Resolution::Dispatch(event) => Some(event),
                    Resolution::Exit => return Ok(None),
                    Resolution::Stay => None,
                }
            }
        };

        if let Some(event) = event {
            let before = view.state;
            let after = session.dispatch(&event);
            if before == after && matches!(event, WizardEvent::Advance | WizardEvent::Submit) {
                ctx.status(Tone::Warning, "Please correct the highlighted fields.");
            }
        }
    }

    Ok(session.into_submitter().take())
}

/// Where a confirmed or declined menu action leads.
#[derive(Debug, Clone, PartialEq)]
enum Resolution {
    Dispatch(WizardEvent),
    Exit,
    Stay,
}

/// Prompt and default answer for the actions that ask before acting.
fn confirmation(action: Action) -> (&'static str, bool) {
    match action {
        Action::Quit => ("Discard your answers and quit?", false),
        _ => ("Submit the diagnostic now?", true),
    }
}

fn resolve(action: Action, confirmed: bool) -> Resolution {
    match (action, confirmed) {
        (Action::Quit, true) => Resolution::Exit,
        (Action::Submit, true) => Resolution::Dispatch(WizardEvent::Submit),
        _ => Resolution::Stay,
    }
}

fn print_step(ctx: &AppContext, view: &WizardView) {
    ctx.status(Tone::Heading, &format!(
        "Step {} of 2: {}",
        view.step.number(),
        view.step.title()
    ));
    if view.fields.contains(&Field::Georeference) {
        ctx.status(Tone::Info, &describe_viewport(&view.map));
    }
}

fn actions_for(view: &WizardView) -> Vec<Action> {
    let mut actions: Vec<Action> = view.fields.iter().copied().map(Action::Edit).collect();
    match view.state {
        WizardState::Identification => actions.push(Action::Next),
        WizardState::Operational => {
            actions.push(Action::Submit);
            actions.push(Action::Back);
        }
        WizardState::Submitted => {}
    }
    actions.push(Action::Quit);
    actions
}

fn menu_label(view: &WizardView, action: Action) -> String {
    match action {
        Action::Edit(field) => {
            let mut label = format!("{}: {}", field.label(), display_value(view, field));
            if let Some(error) = view.errors.get(field) {
                label.push_str(&format!("  ✗ {}", error).red().to_string());
            }
            label
        }
        Action::Next => "→ Next".bold().to_string(),
        Action::Back => "← Back".to_string(),
        Action::Submit => "✓ Submit".green().bold().to_string(),
        Action::Quit => "Quit".dimmed().to_string(),
    }
}

/// Current answer as shown in the step menu.
pub fn display_value(view: &WizardView, field: Field) -> String {
    let answers = &view.answers;
    let value = match field {
        Field::OrganizationKind => answers.organization_kind.label().to_string(),
        Field::IdType => answers.id_type.label().to_string(),
        Field::Consent => {
            let text = if answers.consent { "accepted" } else { "not accepted" };
            text.to_string()
        }
        Field::EnvironmentalSystem => view.environmental.system.label().to_string(),
        Field::AttachedDocuments => {
            let documents = &view.environmental.documents;
            match documents.len() {
                0 => String::new(),
                1 => documents[0].clone(),
                n => format!("{} files ({})", n, documents.join(", ")),
            }
        }
        _ => answers.text(field).unwrap_or_default().to_string(),
    };

    if value.trim().is_empty() {
        "—".to_string()
    } else {
        value
    }
}

/// Human-readable map state: center, zoom and marker.
pub fn describe_viewport(map: &MapViewport) -> String {
    let marker = match map.marker {
        Some(point) => format!("marker at {}", point.to_georeference()),
        None => "no marker".to_string(),
    };
    format!(
        "Map centered on {} (zoom {}), {}",
        map.center.to_georeference(),
        map.zoom,
        marker
    )
}

/// Parse a `lat, lng` pair typed in place of a map click.
pub fn parse_coordinates(input: &str) -> Result<(f64, f64)> {
    let (lat, lng) = input
        .split_once(',')
        .context("Enter the point as `lat, lng`")?;
    let lat: f64 = lat.trim().parse().context("Latitude must be a number")?;
    let lng: f64 = lng.trim().parse().context("Longitude must be a number")?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        bail!("Coordinates out of range");
    }
    Ok((lat, lng))
}

/// Comma-separated file names, blanks dropped.
pub fn parse_document_names(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn prompt_field(ctx: &AppContext, view: &WizardView, field: Field) -> Result<Option<WizardEvent>> {
    let theme = &ctx.theme;

    let event = match (field, field.kind()) {
        (Field::Georeference, _) => {
            let options = ["Click on the map", "Type the coordinates"];
            let choice = Select::with_theme(theme)
                .with_prompt(field.label())
                .items(&options)
                .default(0)
                .interact()?;
            if choice == 0 {
                let raw: String = Input::with_theme(theme)
                    .with_prompt("Map click (lat, lng)")
                    .interact_text()?;
                match parse_coordinates(&raw) {
                    Ok((lat, lng)) => WizardEvent::MapClicked { lat, lng },
                    Err(err) => {
                        ctx.status(Tone::Error, &format!("{:#}", err));
                        return Ok(None);
                    }
                }
            } else {
                text_event(theme, view, field)?
            }
        }
        (Field::EnvironmentalSystem, _) => {
            let options = [EnvironmentalSystem::Yes, EnvironmentalSystem::No];
            let labels: Vec<&str> = options.iter().map(|o| o.label()).collect();
            let current = options
                .iter()
                .position(|o| *o == view.environmental.system)
                .unwrap_or(0);
            let choice = Select::with_theme(theme)
                .with_prompt(field.label())
                .items(&labels)
                .default(current)
                .interact()?;
            WizardEvent::EnvironmentalSystemSelected {
                choice: options[choice],
            }
        }
        (Field::AttachedDocuments, _) => {
            let raw: String = Input::with_theme(theme)
                .with_prompt("File names, separated by commas")
                .with_initial_text(view.environmental.documents.join(", "))
                .allow_empty(true)
                .interact_text()?;
            WizardEvent::DocumentsSelected {
                names: parse_document_names(&raw),
            }
        }
        (_, FieldKind::OrganizationKind) => {
            let options = OrganizationKind::variants();
            let labels: Vec<&str> = options.iter().map(|o| o.label()).collect();
            let current = options
                .iter()
                .position(|o| *o == view.answers.organization_kind)
                .unwrap_or(0);
            let choice = Select::with_theme(theme)
                .with_prompt(field.label())
                .items(&labels)
                .default(current)
                .interact()?;
            WizardEvent::FieldChanged {
                field,
                value: options[choice].into(),
            }
        }
        (_, FieldKind::IdType) => {
            let options = IdType::variants();
            let labels: Vec<&str> = options.iter().map(|o| o.label()).collect();
            let current = options
                .iter()
                .position(|o| *o == view.answers.id_type)
                .unwrap_or(0);
            let choice = Select::with_theme(theme)
                .with_prompt(field.label())
                .items(&labels)
                .default(current)
                .interact()?;
            WizardEvent::FieldChanged {
                field,
                value: options[choice].into(),
            }
        }
        (_, FieldKind::Flag) => {
            let accepted = Confirm::with_theme(theme)
                .with_prompt(field.label())
                .default(view.answers.consent)
                .interact()?;
            WizardEvent::FieldChanged {
                field,
                value: accepted.into(),
            }
        }
        _ => text_event(theme, view, field)?,
    };

    Ok(Some(event))
}

fn text_event(
    theme: &dialoguer::theme::ColorfulTheme,
    view: &WizardView,
    field: Field,
) -> Result<WizardEvent> {
    let current = view.answers.text(field).unwrap_or_default().to_string();
    let value: String = Input::with_theme(theme)
        .with_prompt(field.label())
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(WizardEvent::FieldChanged {
        field,
        value: value.into(),
    })
}
