//! Command ticks in the main chart, one lane per category.

use std::collections::HashSet;

use crate::models::command::InteractionEvent;
use crate::models::time::TimePoint;
use crate::render::config::LayoutConfig;
use crate::render::coords::x_position;
use crate::render::surface::{DrawingSurface, Line};

const ENABLE_LOGS: bool = false;

use crate::log_debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCategory {
    Open,
    Select,
    Move,
    MoveKeyboard,
    Edit,
    TextSearch,
    FindNext,
    FindDialog,
    SearchDeclarations,
    FileSearch,
    SearchReferences,
    Assist,
    Save,
    Run,
    Debugging,
    BreakpointRuler,
    JavaPerspective,
    Terminate,
    OpenEditor,
    CallHierarchy,
    Default,
}

pub struct CategoryStyle {
    pub label: &'static str,
    pub color: &'static str,
    /// 1-based lane in the main chart.
    pub lane: usize,
}

impl CommandCategory {
    /// Legend order.
    pub const ALL: [CommandCategory; 21] = [
        CommandCategory::Open,
        CommandCategory::Select,
        CommandCategory::Move,
        CommandCategory::MoveKeyboard,
        CommandCategory::Edit,
        CommandCategory::TextSearch,
        CommandCategory::FindNext,
        CommandCategory::FindDialog,
        CommandCategory::SearchDeclarations,
        CommandCategory::FileSearch,
        CommandCategory::SearchReferences,
        CommandCategory::Assist,
        CommandCategory::Save,
        CommandCategory::Run,
        CommandCategory::Debugging,
        CommandCategory::BreakpointRuler,
        CommandCategory::JavaPerspective,
        CommandCategory::Terminate,
        CommandCategory::OpenEditor,
        CommandCategory::CallHierarchy,
        CommandCategory::Default,
    ];

    pub fn style(&self) -> CategoryStyle {
        let (label, color, lane) = match self {
            CommandCategory::Open => ("Open", "maroon", 1),
            CommandCategory::Select => ("Select", "indigo", 2),
            CommandCategory::Move => ("Move", "yellow", 3),
            CommandCategory::MoveKeyboard => ("Move keyboard", "magenta", 4),
            CommandCategory::Edit => ("Edit", "red", 5),
            CommandCategory::TextSearch => ("Text search", "orange", 6),
            CommandCategory::FindNext => ("Find next", "green", 7),
            CommandCategory::FindDialog => ("Find dialog", "steelblue", 8),
            CommandCategory::SearchDeclarations => ("Search declarations", "red", 9),
            CommandCategory::FileSearch => ("File search", "pink", 10),
            CommandCategory::SearchReferences => ("Search references", "green", 11),
            CommandCategory::Assist => ("Assist", "blue", 12),
            CommandCategory::Save => ("Save", "deeppink", 13),
            CommandCategory::Run => ("Run", "darkgreen", 14),
            CommandCategory::Debugging => ("Debugging", "olive", 15),
            CommandCategory::BreakpointRuler => ("Breakpoint ruler", "darkolivegreen", 16),
            CommandCategory::JavaPerspective => ("Java perspective", "olivedrab", 17),
            CommandCategory::Terminate => ("Terminate", "greenyellow", 18),
            CommandCategory::OpenEditor => ("Open editor", "slateblue", 19),
            CommandCategory::CallHierarchy => ("Call hierarchy", "steelblue", 20),
            CommandCategory::Default => ("Default", "darkslategrey", 21),
        };
        CategoryStyle { label, color, lane }
    }
}

use CommandCategory as C;

/// Logger command ids. `None` marks commands that are logged but not charted.
const COMMANDS: &[(&str, Option<CommandCategory>)] = &[
    ("FileOpenCommand", Some(C::Open)),
    ("SelectTextCommand", Some(C::Select)),
    ("MoveCaretCommand", None),
    ("CopyCommand", None),
    ("CutCommand", None),
    ("PasteCommand", None),
    ("RunCommand", Some(C::Run)),
    ("Insert", Some(C::Edit)),
    ("Delete", Some(C::Edit)),
    ("Replace", Some(C::Edit)),
    ("UndoCommand", Some(C::Edit)),
    // duplicates Insert
    ("InsertStringCommand", None),
    ("FindCommand", Some(C::TextSearch)),
    ("AssistCommand", None),
];

/// Marker command whose category comes from the editor command column.
const EDITOR_COMMAND: &str = "EclipseCommand";

const EDITOR_COMMANDS: &[(&str, Option<CommandCategory>)] = &[
    (
        "AUTOGEN:::org.eclipse.jdt.debug.CompilationUnitEditor.BreakpointRulerActions/org.eclipse.jdt.debug.ui.actions.ManageBreakpointRulerAction",
        Some(C::BreakpointRuler),
    ),
    // gutter clicks
    (
        "AUTOGEN:::org.eclipse.jdt.internal.ui.CompilationUnitEditor.ruler.actions/org.eclipse.jdt.internal.ui.javaeditor.JavaSelectRulerAction",
        None,
    ),
    ("eventLogger.styledTextCommand.COLUMN_NEXT", Some(C::MoveKeyboard)),
    ("eventLogger.styledTextCommand.COLUMN_PREVIOUS", Some(C::MoveKeyboard)),
    ("eventLogger.styledTextCommand.DELETE_PREVIOUS", Some(C::MoveKeyboard)),
    ("eventLogger.styledTextCommand.LINE_DOWN", Some(C::MoveKeyboard)),
    ("eventLogger.styledTextCommand.LINE_UP", Some(C::MoveKeyboard)),
    ("eventLogger.styledTextCommand.SELECT_COLUMN_NEXT", Some(C::MoveKeyboard)),
    ("eventLogger.styledTextCommand.SELECT_COLUMN_PREVIOUS", Some(C::MoveKeyboard)),
    ("eventLogger.styledTextCommand.SELECT_LINE_UP", Some(C::MoveKeyboard)),
    ("org.eclipse.debug.ui.commands.DebugLast", Some(C::Run)),
    ("org.eclipse.debug.ui.commands.Resume", Some(C::Debugging)),
    ("org.eclipse.debug.ui.commands.RunLast", Some(C::Run)),
    ("org.eclipse.debug.ui.commands.StepInto", Some(C::Debugging)),
    ("org.eclipse.debug.ui.commands.StepOver", Some(C::Debugging)),
    ("org.eclipse.debug.ui.commands.StepReturn", Some(C::Debugging)),
    ("org.eclipse.debug.ui.commands.Terminate", Some(C::Terminate)),
    ("org.eclipse.debug.ui.commands.eof", None),
    ("org.eclipse.jdt.ui.JavaPerspective", Some(C::JavaPerspective)),
    ("org.eclipse.jdt.ui.edit.text.java.gotoBreadcrumb", None),
    ("org.eclipse.jdt.ui.edit.text.java.open.call.hierarchy", Some(C::CallHierarchy)),
    ("org.eclipse.jdt.ui.edit.text.java.open.editor", Some(C::OpenEditor)),
    ("org.eclipse.jdt.ui.edit.text.java.organize.imports", None),
    (
        "org.eclipse.jdt.ui.edit.text.java.search.declarations.in.project",
        Some(C::SearchDeclarations),
    ),
    (
        "org.eclipse.jdt.ui.edit.text.java.search.declarations.in.workspace",
        Some(C::SearchDeclarations),
    ),
    (
        "org.eclipse.jdt.ui.edit.text.java.search.references.in.project",
        Some(C::SearchReferences),
    ),
    (
        "org.eclipse.jdt.ui.edit.text.java.search.references.in.workspace",
        Some(C::SearchReferences),
    ),
    ("org.eclipse.jdt.ui.edit.text.java.show.outline", Some(C::SearchReferences)),
    ("org.eclipse.jdt.ui.navigate.open.type", None),
    ("org.eclipse.jdt.ui.navigate.open.type.in.hierarchy", Some(C::CallHierarchy)),
    ("org.eclipse.search.ui.openFileSearchPage", Some(C::FileSearch)),
    ("org.eclipse.search.ui.openSearchDialog", Some(C::FindDialog)),
    ("org.eclipse.search.ui.performTextSearchFile", Some(C::TextSearch)),
    ("org.eclipse.search.ui.performTextSearchWorkspace", Some(C::TextSearch)),
    ("org.eclipse.ui.edit.findNext", Some(C::FindNext)),
    ("org.eclipse.ui.edit.selectAll", None),
    ("org.eclipse.ui.edit.text.contentAssist.proposals", Some(C::Assist)),
    ("org.eclipse.ui.edit.text.folding.collapse_all", None),
    ("org.eclipse.ui.edit.text.goto.lineEnd", Some(C::MoveKeyboard)),
    ("org.eclipse.ui.edit.text.goto.lineStart", Some(C::MoveKeyboard)),
    ("org.eclipse.ui.edit.text.goto.textStart", Some(C::MoveKeyboard)),
    ("org.eclipse.ui.edit.text.goto.wordNext", Some(C::MoveKeyboard)),
    ("org.eclipse.ui.edit.text.goto.wordPrevious", Some(C::MoveKeyboard)),
    ("org.eclipse.ui.edit.text.select.lineStart", Some(C::MoveKeyboard)),
    ("org.eclipse.ui.edit.text.select.wordNext", Some(C::MoveKeyboard)),
    ("org.eclipse.ui.edit.text.select.wordPrevious", Some(C::MoveKeyboard)),
    ("org.eclipse.ui.edit.text.showInformation", None),
    ("org.eclipse.ui.file.properties", None),
    ("org.eclipse.ui.file.refresh", Some(C::Open)),
    ("org.eclipse.ui.file.save", Some(C::Save)),
    ("org.eclipse.ui.navigate.openResource", Some(C::Open)),
    // same switch as JavaPerspective
    ("org.eclipse.ui.perspectives.showPerspective", None),
    ("org.eclipse.ui.views.showView", None),
    ("org.eclipse.ui.window.newEditor", None),
];

fn lookup(table: &[(&str, Option<CommandCategory>)], id: &str) -> Option<Option<CommandCategory>> {
    table
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, category)| *category)
}

/// Chart category for an event, or `None` when the command is not charted.
/// Identifiers missing from both tables fall through to
/// [`CommandCategory::Default`].
pub fn classify(event: &InteractionEvent) -> Option<CommandCategory> {
    let (table, id) = if event.command == EDITOR_COMMAND {
        (EDITOR_COMMANDS, event.editor_command.as_str())
    } else {
        (COMMANDS, event.command.as_str())
    };

    lookup(table, id).unwrap_or_else(|| {
        log_debug!("unclassified command {id:?}, charting as default");
        Some(CommandCategory::Default)
    })
}

pub fn draw_command_ticks(
    surface: &mut dyn DrawingSurface,
    layout: &LayoutConfig,
    session_start: TimePoint,
    events: &[InteractionEvent],
) {
    let mut occupied = HashSet::new();

    for event in events.iter().filter(|e| !e.error) {
        let Ok(xpos) = x_position(session_start, event.time) else {
            continue;
        };
        let Some(category) = classify(event) else {
            continue;
        };
        let x = xpos as f64 + layout.x_offset;

        if !occupied.insert(xpos) {
            surface.line(Line {
                x1: x,
                y1: layout.y_offset,
                x2: x,
                y2: layout.y_offset - 5.0,
                stroke: "black",
                width: 1.0,
                opacity: 1.0,
                dasharray: None,
            });
        }

        let style = category.style();
        let top = (style.lane - 1) as f64 * layout.event_height + layout.y_offset;
        surface.line(Line {
            x1: x,
            y1: top,
            x2: x,
            y2: top + layout.event_height,
            stroke: style.color,
            width: 1.0,
            opacity: 0.9,
            dasharray: None,
        });
    }
}
