//! Editor session: the context object a host drives.
//!
//! The session owns the scene adapter, tool machine, layer list, and
//! history, and is the only place they meet. Every operation follows the
//! same shape: turn the request into `GraphMutation`s, apply them through
//! the adapter, then dispatch the resulting `SceneEvent`s in
//! `process_events` to the layer list, the history debouncer, and the
//! unsaved-changes flag.
//!
//! Time is passed in by the host (`now_ms`) so debounced recording and
//! autosave are driven by `tick` / `autosave` calls rather than timers.
//!
//! User-facing outcomes are queued as `Notice`s; failures are also returned
//! as `EditorError` so hosts can branch on them. Nothing here is fatal to
//! the session.

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::history::{Debouncer, History, RestoreGuard};
use crate::input::{InputEvent, Modifiers};
use crate::layers::{LayerProjection, LayerSelection};
use crate::navigation::{Destination, NavigationDecision, UNSAVED_CHANGES_WARNING};
use crate::notice::Notice;
use crate::persistence::{PersistenceGateway, ProjectId, SaveRequest};
use crate::properties::{
    BrushSettings, ColorTarget, Geometry, PropertyTarget, RecentColors, color_mutations,
    geometry_mutation, read_color, text_mutations,
};
use crate::scene::{GraphMutation, SceneAdapter, SceneEvent, ZOrderOp};
use crate::shortcuts::{KeyInput, ShortcutAction, ShortcutMap};
use crate::tools::{ToolCapabilities, ToolKind, ToolMachine};
use gd_core::id::{LayerId, ObjectId};
use gd_core::model::{Color, Drawable, SceneGraph};

pub struct EditorSession {
    config: EditorConfig,
    scene: SceneAdapter,
    tools: ToolMachine,
    layers: LayerProjection,
    history: History,
    record_debounce: Debouncer,
    autosave_debounce: Debouncer,
    guard: RestoreGuard,
    recent_colors: RecentColors,
    brush: BrushSettings,
    unsaved: bool,
    notices: Vec<Notice>,
    project: Option<ProjectId>,
    project_name: Option<String>,
    editor_identity: String,
    /// Scene captured when a select-mode press lands on an object.
    gesture_snapshot: Option<String>,
    pending_navigation: Option<Destination>,
    /// Host time of the latest timed call, for events raised by untimed
    /// calls such as `set_tool`.
    last_event_ms: f64,
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        Self::with_capabilities(config, ToolCapabilities::default())
    }

    /// Build a session on a host that may lack some tool back-ends. Missing
    /// capabilities are reported as a warning notice; the session still
    /// starts.
    pub fn with_capabilities(
        config: EditorConfig,
        capabilities: ToolCapabilities,
    ) -> Result<Self, EditorError> {
        let scene = SceneAdapter::new(&config);
        let mut history = History::new(config.history_depth);
        history.initialize(scene.serialize()?);

        let mut notices = Vec::new();
        if !capabilities.freehand || !capabilities.eraser {
            log::warn!("starting with reduced tool capabilities: {capabilities:?}");
            notices.push(Notice::warning(
                "Some drawing tools are unavailable; using reduced mode",
            ));
        }

        Ok(Self {
            tools: ToolMachine::with_capabilities(&config, capabilities),
            layers: LayerProjection::new(),
            history,
            record_debounce: Debouncer::new(config.history_debounce_ms),
            autosave_debounce: Debouncer::new(config.autosave_ms),
            guard: RestoreGuard::default(),
            recent_colors: RecentColors::new(config.recent_colors),
            brush: BrushSettings::new(config.brush_color, config.brush_width),
            unsaved: false,
            notices,
            project: None,
            project_name: None,
            editor_identity: "anonymous".into(),
            gesture_snapshot: None,
            pending_navigation: None,
            last_event_ms: 0.0,
            scene,
            config,
        })
    }

    pub fn set_editor_identity(&mut self, identity: impl Into<String>) {
        self.editor_identity = identity.into();
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneAdapter {
        &self.scene
    }

    pub fn graph(&self) -> &SceneGraph {
        self.scene.graph()
    }

    pub fn layers(&self) -> &LayerProjection {
        &self.layers
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn active_tool(&self) -> ToolKind {
        self.tools.active()
    }

    pub fn tools(&self) -> &ToolMachine {
        &self.tools
    }

    pub fn selection(&self) -> &[ObjectId] {
        self.scene.selection()
    }

    pub fn property_target(&self) -> PropertyTarget {
        PropertyTarget::from_selection(self.scene.selection())
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    pub fn recent_colors(&self) -> &RecentColors {
        &self.recent_colors
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn project(&self) -> Option<&ProjectId> {
        self.project.as_ref()
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Hand queued notices to the host.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    fn apply_all(&mut self, mutations: Vec<GraphMutation>) -> Result<(), EditorError> {
        for mutation in mutations {
            self.scene.apply(mutation)?;
        }
        Ok(())
    }

    fn process_events(&mut self, now_ms: f64) {
        self.last_event_ms = now_ms;
        for event in self.scene.drain_events() {
            match event {
                SceneEvent::ObjectAdded { id, internal } => {
                    if !internal {
                        let name = self
                            .scene
                            .get(id)
                            .and_then(|obj| self.layers.on_object_added(obj))
                            .map(|layer| layer.name.clone());
                        if let Some(name) = name {
                            self.scene.name_object(id, &name);
                        }
                    }
                    self.note_change(now_ms, internal);
                }
                SceneEvent::ObjectRemoved { id } => {
                    self.layers.on_object_removed(id);
                    self.note_change(now_ms, false);
                }
                SceneEvent::ObjectModified { .. }
                | SceneEvent::PathCreated { .. }
                | SceneEvent::TextChanged { .. }
                | SceneEvent::BackgroundChanged
                | SceneEvent::ZOrderChanged { .. } => self.note_change(now_ms, false),
                SceneEvent::VisibilityChanged { .. } => {
                    // Cosmetic: marks the project dirty but is not an undo step.
                    if !self.guard.is_active() {
                        self.mark_unsaved(now_ms);
                    }
                }
                SceneEvent::SelectionChanged { ids } => self.layers.follow_selection(&ids),
                SceneEvent::Restored => {
                    self.layers.rebuild(self.scene.graph());
                    self.layers.follow_selection(&[]);
                }
            }
        }
    }

    fn note_change(&mut self, now_ms: f64, internal: bool) {
        if internal || self.guard.is_active() {
            return;
        }
        self.record_debounce.trigger(now_ms);
        self.mark_unsaved(now_ms);
    }

    fn mark_unsaved(&mut self, now_ms: f64) {
        self.unsaved = true;
        if self.config.autosave && self.project.is_some() {
            self.autosave_debounce.trigger(now_ms);
        }
    }

    /// Take a history snapshot right now.
    fn record_now(&mut self) {
        match self.scene.serialize() {
            Ok(snapshot) => {
                self.history.record(snapshot);
            }
            Err(err) => {
                log::error!("history snapshot failed: {err}");
                self.notices.push(Notice::error("Failed to save history"));
            }
        }
    }

    fn flush_pending_record(&mut self) {
        if self.record_debounce.take_pending() {
            self.record_now();
        }
    }

    /// Advance the clock: records a snapshot once edits have settled.
    /// Returns whether a snapshot was taken.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.record_debounce.poll(now_ms) {
            self.record_now();
            return true;
        }
        false
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    fn dispatch(&mut self, event: InputEvent, now_ms: f64) {
        let mutations = self.tools.handle(&event, &self.scene);
        if let Err(err) = self.apply_all(mutations) {
            log::warn!("tool mutation rejected: {err}");
        }
        self.process_events(now_ms);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, modifiers: Modifiers, now_ms: f64) {
        // Only select mode manipulates existing objects. Presses in the
        // drawing tools create new ones and are recorded by the debounce.
        if self.tools.active() == ToolKind::Select && self.scene.hit_test(x, y).is_some() {
            self.gesture_snapshot = self.scene.serialize().ok();
        }
        self.dispatch(InputEvent::from_pointer_down(x, y, modifiers), now_ms);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, modifiers: Modifiers, now_ms: f64) {
        self.dispatch(InputEvent::from_pointer_move(x, y, modifiers), now_ms);
    }

    /// Ends a gesture. A select-mode manipulation that changed the scene is
    /// recorded immediately instead of waiting for the debounce.
    pub fn pointer_up(&mut self, x: f32, y: f32, modifiers: Modifiers, now_ms: f64) {
        self.dispatch(InputEvent::from_pointer_up(x, y, modifiers), now_ms);
        if let Some(before) = self.gesture_snapshot.take()
            && self.scene.serialize().is_ok_and(|after| after != before)
        {
            self.record_debounce.cancel();
            self.record_now();
        }
    }

    /// Switch tools. A shape left half-drawn by the previous tool is
    /// removed along with its layer.
    pub fn set_tool(&mut self, kind: ToolKind) -> Result<ToolKind, EditorError> {
        self.gesture_snapshot = None;
        let result = self.tools.set_tool(kind, &mut self.scene);
        self.process_events(self.last_event_ms);
        if result.is_err() {
            self.notices.push(Notice::warning(format!(
                "The {kind} tool is unavailable; switched to select"
            )));
        }
        result
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self, now_ms: f64) -> Result<(), EditorError> {
        self.restore(now_ms, true)
    }

    pub fn redo(&mut self, now_ms: f64) -> Result<(), EditorError> {
        self.restore(now_ms, false)
    }

    fn restore(&mut self, now_ms: f64, backward: bool) -> Result<(), EditorError> {
        // Edits still waiting on the debounce become their own step first.
        self.flush_pending_record();
        self.guard.begin()?;
        self.gesture_snapshot = None;

        let scene = &mut self.scene;
        let apply = |snapshot: &str| scene.deserialize(snapshot).map_err(EditorError::from);
        let result = if backward {
            self.history.undo_with(apply)
        } else {
            self.history.redo_with(apply)
        };
        self.tools.reconfigure(&mut self.scene);
        self.process_events(now_ms);
        self.guard.end();

        let verb = if backward { "undo" } else { "redo" };
        match result {
            Ok(()) => {
                self.mark_unsaved(now_ms);
                self.notices
                    .push(Notice::success(format!("{} successful", capitalize(verb))));
                Ok(())
            }
            Err(err @ (EditorError::NothingToUndo | EditorError::NothingToRedo)) => {
                self.notices.push(Notice::info(format!("Nothing to {verb}")));
                Err(err)
            }
            Err(err) => {
                log::error!("{verb} failed: {err}");
                self.notices.push(Notice::error(format!("Failed to {verb}")));
                Err(err)
            }
        }
    }

    // ─── Objects & layers ────────────────────────────────────────────────

    /// Place a ready-made object, such as an uploaded image. Internal
    /// objects are editor helpers: they get no layer and no undo step.
    pub fn add_object(&mut self, object: Drawable, internal: bool, now_ms: f64) -> ObjectId {
        let id = self.scene.add_object(object, internal);
        self.process_events(now_ms);
        id
    }

    /// Remove every selected object.
    pub fn delete_selected(&mut self, now_ms: f64) -> Result<usize, EditorError> {
        let ids: Vec<ObjectId> = self.scene.selection().to_vec();
        if ids.is_empty() {
            self.notices.push(Notice::info("Nothing selected"));
            return Ok(0);
        }
        for id in &ids {
            self.scene.remove_object(*id)?;
        }
        self.process_events(now_ms);
        self.notices.push(Notice::success("Object deleted"));
        Ok(ids.len())
    }

    pub fn clear_selection(&mut self, now_ms: f64) {
        self.scene.clear_selection();
        self.process_events(now_ms);
    }

    pub fn select_layer(&mut self, id: LayerId, now_ms: f64) -> Result<LayerSelection, EditorError> {
        let selection = self.layers.select(id)?;
        match selection {
            LayerSelection::Object(obj) => self.scene.select(&[obj]),
            LayerSelection::Background => self.scene.clear_selection(),
        }
        self.process_events(now_ms);
        Ok(selection)
    }

    pub fn toggle_layer_visibility(&mut self, id: LayerId, now_ms: f64) -> Result<(), EditorError> {
        if let Some(mutation) = self.layers.toggle_visibility(id)? {
            self.scene.apply(mutation)?;
        }
        self.process_events(now_ms);
        Ok(())
    }

    pub fn move_layer_up(&mut self, id: LayerId, now_ms: f64) -> Result<(), EditorError> {
        if let Some(mutation) = self.layers.move_up(id)? {
            self.scene.apply(mutation)?;
        }
        self.process_events(now_ms);
        Ok(())
    }

    pub fn move_layer_down(&mut self, id: LayerId, now_ms: f64) -> Result<(), EditorError> {
        if let Some(mutation) = self.layers.move_down(id)? {
            self.scene.apply(mutation)?;
        }
        self.process_events(now_ms);
        Ok(())
    }

    pub fn delete_layer(&mut self, id: LayerId, now_ms: f64) -> Result<(), EditorError> {
        let object = match self.layers.delete(id) {
            Ok(object) => object,
            Err(err) => {
                if matches!(err, EditorError::BackgroundLayerLocked) {
                    self.notices
                        .push(Notice::error("Cannot delete background layer"));
                }
                return Err(err);
            }
        };
        self.scene.remove_object(object)?;
        self.process_events(now_ms);
        self.notices.push(Notice::success("Layer deleted"));
        Ok(())
    }

    /// Z-order command on the selection, mirrored into the layer list by a
    /// rebuild.
    pub fn reorder_selected(&mut self, op: ZOrderOp, now_ms: f64) -> Result<(), EditorError> {
        let ids: Vec<ObjectId> = self.scene.selection().to_vec();
        for id in ids {
            self.scene.apply(GraphMutation::ZOrder { id, op })?;
        }
        self.process_events(now_ms);
        self.layers.rebuild(self.scene.graph());
        Ok(())
    }

    // ─── Properties ──────────────────────────────────────────────────────

    pub fn read_color(&self, which: ColorTarget) -> Option<Color> {
        read_color(&self.scene, &self.property_target(), which)
    }

    /// Set fill or stroke on the selection, or the surface background when
    /// nothing is selected.
    pub fn set_color(&mut self, which: ColorTarget, color: Color, now_ms: f64) -> Result<(), EditorError> {
        let mutations = color_mutations(&self.property_target(), which, color);
        self.apply_all(mutations)?;
        self.recent_colors.push(color);
        self.process_events(now_ms);
        Ok(())
    }

    pub fn set_geometry(&mut self, geometry: Geometry, now_ms: f64) -> Result<(), EditorError> {
        let mutations = self
            .scene
            .selection()
            .iter()
            .map(|id| geometry_mutation(*id, geometry))
            .collect();
        self.apply_all(mutations)?;
        self.process_events(now_ms);
        Ok(())
    }

    pub fn set_text(&mut self, content: &str, now_ms: f64) -> Result<(), EditorError> {
        let mutations = text_mutations(&self.scene, &self.property_target(), Some(content), None);
        self.apply_all(mutations)?;
        self.process_events(now_ms);
        Ok(())
    }

    pub fn set_font_size(&mut self, size: f32, now_ms: f64) -> Result<(), EditorError> {
        let mutations = text_mutations(&self.scene, &self.property_target(), None, Some(size));
        self.apply_all(mutations)?;
        self.process_events(now_ms);
        Ok(())
    }

    /// Brush changes apply from the next stroke.
    pub fn set_brush(&mut self, color: Color, width: f32) {
        self.brush = BrushSettings::new(color, width);
        self.tools.set_brush(self.brush);
        self.recent_colors.push(color);
    }

    // ─── Zoom ────────────────────────────────────────────────────────────

    pub fn zoom(&self) -> u16 {
        self.scene.zoom()
    }

    pub fn zoom_in(&mut self) -> u16 {
        if !self.scene.zoom_in() {
            self.notices.push(Notice::info("Maximum zoom reached"));
        }
        self.scene.zoom()
    }

    pub fn zoom_out(&mut self) -> u16 {
        if !self.scene.zoom_out() {
            self.notices.push(Notice::info("Minimum zoom reached"));
        }
        self.scene.zoom()
    }

    pub fn set_zoom(&mut self, percent: u16) -> u16 {
        self.scene.set_zoom(percent)
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Resolve and run a shortcut. `Save` needs a gateway, so it is only
    /// returned for the host to act on.
    pub fn handle_key(&mut self, input: &KeyInput, now_ms: f64) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve(input)?;
        let result = match action {
            ShortcutAction::Tool(kind) => self.set_tool(kind).map(|_| ()),
            ShortcutAction::Undo => self.undo(now_ms),
            ShortcutAction::Redo => self.redo(now_ms),
            ShortcutAction::Delete => self.delete_selected(now_ms).map(|_| ()),
            ShortcutAction::Deselect => {
                self.clear_selection(now_ms);
                Ok(())
            }
            ShortcutAction::ZoomIn => {
                self.zoom_in();
                Ok(())
            }
            ShortcutAction::ZoomOut => {
                self.zoom_out();
                Ok(())
            }
            ShortcutAction::ZoomReset => {
                self.set_zoom(100);
                Ok(())
            }
            ShortcutAction::BringForward => self.reorder_selected(ZOrderOp::BringForward, now_ms),
            ShortcutAction::SendBackward => self.reorder_selected(ZOrderOp::SendBackward, now_ms),
            ShortcutAction::BringToFront => self.reorder_selected(ZOrderOp::BringToFront, now_ms),
            ShortcutAction::SendToBack => self.reorder_selected(ZOrderOp::SendToBack, now_ms),
            ShortcutAction::Save => Ok(()),
        };
        if let Err(err) = result {
            log::debug!("shortcut {action:?} rejected: {err}");
        }
        Some(action)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Open a project. A corrupt canvas leaves the current scene and
    /// project untouched.
    pub fn load_project(
        &mut self,
        gateway: &mut dyn PersistenceGateway,
        id: ProjectId,
        now_ms: f64,
    ) -> Result<(), EditorError> {
        let record = gateway.load_project(&id).inspect_err(|err| {
            log::warn!("loading {id} failed: {err}");
            self.notices.push(Notice::error(err.user_message()));
        })?;

        let canvas = if record.canvas.is_empty() {
            self.blank_canvas()?
        } else {
            record.canvas
        };

        self.guard.begin()?;
        let loaded = self.scene.deserialize(&canvas);
        self.tools.reconfigure(&mut self.scene);
        self.process_events(now_ms);
        self.guard.end();
        if let Err(err) = loaded {
            log::warn!("project {id} has an unreadable canvas: {err}");
            self.notices.push(Notice::error("Failed to load project"));
            return Err(err.into());
        }

        self.history.initialize(self.scene.serialize()?);
        self.record_debounce.cancel();
        self.autosave_debounce.cancel();
        self.gesture_snapshot = None;
        self.unsaved = false;
        log::info!("loaded project {id} ({})", record.name);
        self.project = Some(id);
        self.project_name = Some(record.name);
        Ok(())
    }

    fn blank_canvas(&self) -> Result<String, EditorError> {
        let blank = SceneGraph::new(
            self.config.surface_width,
            self.config.surface_height,
            self.config.background,
        );
        Ok(blank.to_snapshot()?)
    }

    /// Save now. Failure keeps the unsaved flag so a retry is safe.
    pub fn save(&mut self, gateway: &mut dyn PersistenceGateway, now_ms: f64) -> Result<(), EditorError> {
        self.save_inner(gateway, now_ms, true)
    }

    /// Save if the autosave window has elapsed with changes pending.
    /// Returns `None` when nothing was due.
    pub fn autosave(
        &mut self,
        gateway: &mut dyn PersistenceGateway,
        now_ms: f64,
    ) -> Option<Result<(), EditorError>> {
        if !self.autosave_debounce.poll(now_ms) || !self.unsaved || self.project.is_none() {
            return None;
        }
        Some(self.save_inner(gateway, now_ms, false))
    }

    fn save_inner(
        &mut self,
        gateway: &mut dyn PersistenceGateway,
        now_ms: f64,
        announce: bool,
    ) -> Result<(), EditorError> {
        let Some(project) = self.project.clone() else {
            self.notices.push(Notice::error("No project is open"));
            return Err(EditorError::NoProject);
        };
        self.flush_pending_record();
        let request = SaveRequest {
            project,
            canvas: self.scene.serialize()?,
            saved_at_ms: now_ms,
            editor: self.editor_identity.clone(),
        };

        match gateway.save_project(&request) {
            Ok(()) => {
                self.unsaved = false;
                self.autosave_debounce.cancel();
                log::info!("saved project {}", request.project);
                if announce {
                    self.notices.push(Notice::success("Project saved"));
                }
                Ok(())
            }
            Err(err) => {
                log::warn!("saving {} failed: {err}", request.project);
                self.notices.push(Notice::error(err.user_message()));
                if self.config.autosave {
                    self.autosave_debounce.trigger(now_ms);
                }
                Err(err.into())
            }
        }
    }

    // ─── Navigation ──────────────────────────────────────────────────────

    pub fn request_navigation(&mut self, destination: Destination) -> NavigationDecision {
        if !self.unsaved {
            return NavigationDecision::Proceed(destination);
        }
        self.pending_navigation = Some(destination);
        NavigationDecision::ConfirmDiscard {
            destination,
            message: UNSAVED_CHANGES_WARNING,
        }
    }

    /// The user agreed to leave: drop in-memory state and return where to go.
    pub fn confirm_navigation(&mut self) -> Option<Destination> {
        let destination = self.pending_navigation.take()?;
        self.discard();
        Some(destination)
    }

    pub fn cancel_navigation(&mut self) {
        self.pending_navigation = None;
    }

    /// Text for the host's "leave page?" prompt, if one is needed.
    pub fn unload_warning(&self) -> Option<&'static str> {
        self.unsaved.then_some(UNSAVED_CHANGES_WARNING)
    }

    fn discard(&mut self) {
        self.scene = SceneAdapter::new(&self.config);
        self.tools.reconfigure(&mut self.scene);
        self.layers = LayerProjection::new();
        match self.scene.serialize() {
            Ok(snapshot) => self.history.initialize(snapshot),
            Err(err) => log::error!("blank snapshot failed: {err}"),
        }
        self.record_debounce.cancel();
        self.autosave_debounce.cancel();
        self.gesture_snapshot = None;
        self.unsaved = false;
        self.project = None;
        self.project_name = None;
        log::debug!("editor state discarded");
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeLevel;

    fn session() -> EditorSession {
        EditorSession::new(EditorConfig::default()).unwrap()
    }

    #[test]
    fn starts_clean() {
        let mut s = session();
        assert!(!s.has_unsaved_changes());
        assert!(!s.can_undo());
        assert_eq!(s.layers().len(), 1);
        assert_eq!(s.active_tool(), ToolKind::Select);
        assert!(s.take_notices().is_empty());
        assert_eq!(s.unload_warning(), None);
    }

    #[test]
    fn reduced_capabilities_warn_at_startup() {
        let caps = ToolCapabilities {
            freehand: false,
            eraser: true,
        };
        let mut s = EditorSession::with_capabilities(EditorConfig::default(), caps).unwrap();
        let notices = s.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);

        assert!(s.set_tool(ToolKind::Draw).is_err());
        assert_eq!(s.active_tool(), ToolKind::Select);
        assert_eq!(s.take_notices()[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn zoom_bounds_queue_notices() {
        let mut s = session();
        s.set_zoom(200);
        assert_eq!(s.zoom_in(), 200);
        s.set_zoom(10);
        assert_eq!(s.zoom_out(), 10);
        let messages: Vec<String> = s.take_notices().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["Maximum zoom reached", "Minimum zoom reached"]);
    }

    #[test]
    fn undo_at_floor_is_informational() {
        let mut s = session();
        assert!(matches!(s.undo(0.0), Err(EditorError::NothingToUndo)));
        assert!(matches!(s.redo(0.0), Err(EditorError::NothingToRedo)));
        let notices = s.take_notices();
        assert_eq!(notices[0], Notice::info("Nothing to undo"));
        assert_eq!(notices[1], Notice::info("Nothing to redo"));
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("undo"), "Undo");
        assert_eq!(capitalize(""), "");
    }
}
