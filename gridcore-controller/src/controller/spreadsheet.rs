use crate::behaviors::{resize::ResizeState, selection_stats};
use crate::controller::{
    DefaultViewportManager, EventDispatcher, GridConfiguration, KeyboardEvent, MouseEvent,
    SpreadsheetEvent, ViewportManager,
};
use crate::managers::{ErrorFormatter, ErrorManager};
use crate::state::{Action, CellMode, InsertMode, SpreadsheetMode, UIState, UIStateMachine};
use gridcore_core::{types::CellAddress, Result, SpreadsheetFacade};

pub struct SpreadsheetController {
    state_machine: UIStateMachine,
    facade: SpreadsheetFacade,
    event_dispatcher: EventDispatcher,
    viewport_manager: Box<dyn ViewportManager>,
    resize_state: ResizeState,
    error_manager: ErrorManager,
    config: GridConfiguration,
    formula_bar_value: String,
    /// Single-slot clipboard for vim-style yank/delete/paste within cell text.
    cell_text_register: Option<String>,
    /// Operator (`d`/`c`/`y`) awaiting its motion, with the count typed before it.
    cell_text_pending_op: Option<(char, usize)>,
    /// `i`/`a` typed after a pending operator (or in visual mode), awaiting the text object char.
    cell_text_pending_textobj: Option<char>,
    /// Digits typed before a motion/operator, accumulated as a count.
    cell_text_count: String,
    /// Snapshot of the editing buffer before the last mutation, for a single-level `u`.
    cell_text_undo: Option<(String, usize)>,
}

impl SpreadsheetController {
    pub fn new() -> Self {
        let config = GridConfiguration {
            total_rows: 1000,
            total_cols: 100,
            ..Default::default()
        };
        Self::with_config(config)
    }

    pub fn with_config(config: GridConfiguration) -> Self {
        let viewport_manager = Box::new(
            DefaultViewportManager::new(config.total_rows as u32, config.total_cols as u32)
                .with_config(config.clone()),
        );
        Self::with_viewport(viewport_manager, config)
    }

    pub fn with_viewport(
        viewport_manager: Box<dyn ViewportManager>,
        config: GridConfiguration,
    ) -> Self {
        let mut controller = Self {
            state_machine: UIStateMachine::new(None),
            facade: SpreadsheetFacade::new(),
            event_dispatcher: EventDispatcher::new(),
            viewport_manager,
            resize_state: ResizeState::default(),
            error_manager: ErrorManager::new(),
            config,
            formula_bar_value: String::new(),
            cell_text_register: None,
            cell_text_pending_op: None,
            cell_text_pending_textobj: None,
            cell_text_count: String::new(),
            cell_text_undo: None,
        };

        // Subscribe to state changes
        controller.setup_state_listener();

        // Initialize formula bar with current cell value
        controller.update_formula_bar_from_cursor();

        controller
    }

    pub fn with_state(initial_state: UIState) -> Self {
        let config = GridConfiguration::default();

        let mut controller = Self {
            state_machine: UIStateMachine::new(Some(initial_state)),
            facade: SpreadsheetFacade::new(),
            event_dispatcher: EventDispatcher::new(),
            viewport_manager: Box::new(
                DefaultViewportManager::new(1000, 100).with_config(config.clone()),
            ),
            resize_state: ResizeState::default(),
            error_manager: ErrorManager::new(),
            config,
            formula_bar_value: String::new(),
            cell_text_register: None,
            cell_text_pending_op: None,
            cell_text_pending_textobj: None,
            cell_text_count: String::new(),
            cell_text_undo: None,
        };

        controller.setup_state_listener();

        // Initialize formula bar with current cell value
        controller.update_formula_bar_from_cursor();

        controller
    }

    fn setup_state_listener(&mut self) {
        // This would connect state changes to events
        // For now, we'll leave it as a placeholder
    }

    pub fn get_state(&self) -> &UIState {
        self.state_machine.get_state()
    }

    pub fn get_cursor(&self) -> CellAddress {
        *self.state_machine.get_state().cursor()
    }

    pub fn dispatch_action(&mut self, action: Action) -> Result<()> {
        // Handle special actions that need controller logic

        // Handle formula bar actions
        if let Action::UpdateFormulaBar { value } = &action {
            self.set_formula_bar_value(value.clone());
            return Ok(());
        }

        // Handle sheet actions
        if let Action::AddSheet { name } = &action {
            return self.add_sheet(name);
        }

        if let Action::RemoveSheet { name } = &action {
            return self.remove_sheet(name);
        }

        if let Action::RenameSheet { old_name, new_name } = &action {
            return self.rename_sheet(old_name, new_name);
        }

        if let Action::SetActiveSheet { name } = &action {
            return self.set_active_sheet(name);
        }

        if matches!(action, Action::SubmitFormulaBar) {
            // Submit the formula bar value to the current cell
            let value = self.formula_bar_value.clone();
            let cursor = self.get_cursor();

            // Set cell value through facade
            match self.facade.set_cell_value(&cursor, &value) {
                Ok(_) => {
                    // Check if the cell now contains an error value
                    if let Some(gridcore_core::types::CellValue::Error(error_type)) =
                        self.facade.get_cell_raw_value(&cursor)
                    {
                        let enhanced_message =
                            format!("Formula error: {}", error_type.full_display());
                        self.emit_error(
                            enhanced_message,
                            crate::controller::events::ErrorSeverity::Error,
                        );
                    }

                    self.event_dispatcher
                        .dispatch(&SpreadsheetEvent::CellEditCompleted {
                            address: cursor,
                            value: value.clone(),
                        });

                    // Clear formula bar after successful submission
                    if value.is_empty()
                        || !matches!(
                            self.facade.get_cell_raw_value(&cursor),
                            Some(gridcore_core::types::CellValue::Error(_))
                        )
                    {
                        self.set_formula_bar_value(String::new());
                    }
                }
                Err(e) => {
                    let message = ErrorFormatter::format_error(&e);
                    self.emit_error(message, crate::controller::events::ErrorSeverity::Error);
                }
            }
            return Ok(());
        }

        if let Action::SubmitCellEdit { value } = &action {
            // Update the editing value and complete editing
            if let UIState::Editing { cursor, .. } = self.state_machine.get_state() {
                let address = *cursor;

                // Update the cell value in the facade and handle errors
                match self.facade.set_cell_value(&address, value) {
                    Ok(_) => {
                        // Check if the cell now contains an error value
                        if let Some(gridcore_core::types::CellValue::Error(error_type)) =
                            self.facade.get_cell_raw_value(&address)
                        {
                            let enhanced_message =
                                format!("Formula error: {}", error_type.full_display());
                            log::error!("Error in cell {}: {}", address, enhanced_message);
                            self.emit_error(
                                enhanced_message,
                                crate::controller::events::ErrorSeverity::Error,
                            );
                        }

                        self.event_dispatcher
                            .dispatch(&SpreadsheetEvent::CellEditCompleted {
                                address,
                                value: value.clone(),
                            });

                        // Update formula bar to show the new value
                        self.update_formula_bar_from_cursor();
                    }
                    Err(e) => {
                        let message = ErrorFormatter::format_error(&e);
                        log::error!("Parse/Set error in cell {}: {}", address, message);
                        self.emit_error(message, crate::controller::events::ErrorSeverity::Error);
                    }
                }

                // Exit editing mode
                return self.dispatch_action(Action::ExitToNavigation);
            }
            return Ok(());
        }

        let old_mode = self.state_machine.get_state().spreadsheet_mode();
        let old_cursor = *self.state_machine.get_state().cursor();

        log::debug!(
            "dispatch_action: about to transition with action {:?}",
            action
        );

        // Store the action type for later event emission
        let action_clone = action.clone();

        self.state_machine.transition(action)?;
        log::debug!("dispatch_action: transition succeeded");
        let new_mode = self.state_machine.get_state().spreadsheet_mode();
        let _new_cursor = *self.state_machine.get_state().cursor();

        log::debug!(
            "dispatch_action: old_mode={:?}, new_mode={:?}",
            old_mode,
            new_mode
        );

        // Emit CursorMoved event if the cursor changed
        if let Action::UpdateCursor { cursor } = action_clone {
            if old_cursor != cursor {
                self.event_dispatcher
                    .dispatch(&SpreadsheetEvent::CursorMoved {
                        from: old_cursor,
                        to: cursor,
                    });
                log::debug!("dispatch_action: CursorMoved event dispatched");
            }
        }

        if old_mode != new_mode {
            log::debug!("dispatch_action: mode changed, dispatching event");
            self.event_dispatcher
                .dispatch(&SpreadsheetEvent::ModeChanged {
                    from: old_mode,
                    to: new_mode,
                });
            log::debug!("dispatch_action: event dispatched");
        }

        log::debug!("dispatch_action: returning Ok");
        Ok(())
    }

    pub fn get_facade(&self) -> &SpreadsheetFacade {
        &self.facade
    }

    pub fn get_facade_mut(&mut self) -> &mut SpreadsheetFacade {
        &mut self.facade
    }

    /// Get the display value for a cell in the UI
    /// Returns the formula if the cell has one, otherwise the display value
    pub fn get_cell_display_for_ui(&self, address: &CellAddress) -> String {
        if let Some(cell) = self.facade.get_cell(address) {
            if cell.has_formula() {
                // Show the formula for editing
                cell.raw_value.to_string()
            } else {
                // Show the display value
                cell.get_display_value().to_string()
            }
        } else {
            String::new()
        }
    }

    /// Emit an error event and add to error manager
    pub fn emit_error(
        &mut self,
        message: String,
        severity: crate::controller::events::ErrorSeverity,
    ) {
        // Add to error manager
        self.error_manager.add_error(message.clone(), severity);

        // Dispatch event for UI updates
        self.event_dispatcher
            .dispatch(&SpreadsheetEvent::ErrorOccurred { message, severity });
    }

    pub fn get_viewport_manager(&self) -> &dyn ViewportManager {
        self.viewport_manager.as_ref()
    }

    pub fn get_viewport_manager_mut(&mut self) -> &mut dyn ViewportManager {
        self.viewport_manager.as_mut()
    }

    pub fn get_config(&self) -> &GridConfiguration {
        &self.config
    }

    pub fn get_resize_state(&self) -> &ResizeState {
        &self.resize_state
    }

    pub fn get_resize_state_mut(&mut self) -> &mut ResizeState {
        &mut self.resize_state
    }

    pub fn get_current_selection_stats(&self) -> selection_stats::SelectionStats {
        // Get the current selection from the state
        let selection = self.state_machine.get_state().selection();

        if let Some(sel) = selection {
            selection_stats::calculate_selection(&self.facade, sel)
        } else {
            // No selection, calculate for current cursor position
            let cursor = self.state_machine.get_state().cursor();
            selection_stats::calculate_single_cell(&self.facade, cursor)
        }
    }

    /// Get the error manager
    pub fn get_error_manager(&self) -> &ErrorManager {
        &self.error_manager
    }

    /// Get mutable reference to error manager
    pub fn get_error_manager_mut(&mut self) -> &mut ErrorManager {
        &mut self.error_manager
    }

    /// Get active errors from the error manager
    pub fn get_active_errors(&self) -> Vec<crate::managers::ErrorEntry> {
        self.error_manager.get_active_errors()
    }

    /// Clear all errors
    pub fn clear_all_errors(&mut self) {
        self.error_manager.clear_all();
    }

    /// Remove a specific error by ID
    pub fn remove_error(&mut self, id: usize) -> bool {
        self.error_manager.remove_error(id)
    }

    /// Dispatch an event to all listeners
    pub fn dispatch_event(&mut self, event: SpreadsheetEvent) {
        self.event_dispatcher.dispatch(&event);
    }

    /// Get the current formula bar value
    pub fn get_formula_bar_value(&self) -> &str {
        &self.formula_bar_value
    }

    /// Set the formula bar value and dispatch event
    pub fn set_formula_bar_value(&mut self, value: String) {
        self.formula_bar_value = value.clone();
        self.event_dispatcher
            .dispatch(&SpreadsheetEvent::FormulaBarUpdated { value });
    }

    /// Update formula bar based on current cursor position
    pub fn update_formula_bar_from_cursor(&mut self) {
        let cursor = self.get_cursor();
        let value = self.get_cell_display_for_ui(&cursor);
        self.set_formula_bar_value(value);
    }

    // Sheet management methods

    /// Get list of all sheets
    pub fn get_sheets(&self) -> Vec<(String, usize)> {
        self.facade.get_sheets()
    }

    /// Get the active sheet name
    pub fn get_active_sheet(&self) -> String {
        self.facade.get_active_sheet()
    }

    /// Set the active sheet
    pub fn set_active_sheet(&mut self, sheet_name: &str) -> Result<()> {
        self.facade.set_active_sheet(sheet_name)?;
        self.event_dispatcher
            .dispatch(&SpreadsheetEvent::SheetChanged {
                from: self.get_active_sheet(),
                to: sheet_name.to_string(),
            });
        Ok(())
    }

    /// Add a new sheet
    pub fn add_sheet(&mut self, name: &str) -> Result<()> {
        self.facade.add_sheet(name)?;
        self.event_dispatcher
            .dispatch(&SpreadsheetEvent::SheetAdded {
                name: name.to_string(),
            });
        Ok(())
    }

    /// Remove a sheet
    pub fn remove_sheet(&mut self, name: &str) -> Result<()> {
        self.facade.remove_sheet(name)?;
        self.event_dispatcher
            .dispatch(&SpreadsheetEvent::SheetRemoved {
                name: name.to_string(),
            });
        Ok(())
    }

    /// Rename a sheet
    pub fn rename_sheet(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        self.facade.rename_sheet(old_name, new_name)?;
        self.event_dispatcher
            .dispatch(&SpreadsheetEvent::SheetRenamed {
                old_name: old_name.to_string(),
                new_name: new_name.to_string(),
            });
        Ok(())
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.facade.sheet_count()
    }

    pub fn subscribe_to_events<F>(&mut self, listener: F) -> usize
    where
        F: Fn(&SpreadsheetEvent) + Send + 'static,
    {
        self.event_dispatcher.subscribe(listener)
    }

    pub fn unsubscribe_from_events(&mut self, index: usize) {
        self.event_dispatcher.unsubscribe(index)
    }

    // High-level keyboard handling
    pub fn handle_keyboard_event(&mut self, event: KeyboardEvent) -> Result<()> {
        // Clone the mode to avoid borrowing issues
        let mode = self.state_machine.get_state().spreadsheet_mode();
        log::debug!(
            "Handling keyboard event: key='{}', mode={:?}",
            event.key,
            mode
        );

        match mode {
            SpreadsheetMode::Navigation => self.handle_navigation_key(event),
            SpreadsheetMode::Editing => self.handle_editing_key(event),
            SpreadsheetMode::Insert => self.handle_insert_key(event),
            SpreadsheetMode::Command => self.handle_command_key(event),
            SpreadsheetMode::Visual => self.handle_visual_key(event),
            _ => Ok(()),
        }
    }

    fn handle_navigation_key(&mut self, event: KeyboardEvent) -> Result<()> {
        let current_cursor = *self.state_machine.get_state().cursor();
        log::debug!(
            "Navigation mode key: '{}', current cursor: {:?}",
            event.key,
            current_cursor
        );

        match event.key.as_str() {
            // Edit mode triggers
            "i" => {
                // Get existing cell value for insert mode
                let existing_value = self.get_cell_display_for_ui(&current_cursor);
                log::debug!(
                    "'i' key pressed, starting insert mode with existing value: '{}', cursor at 0",
                    existing_value
                );
                let result = self.dispatch_action(Action::StartEditing {
                    edit_mode: Some(InsertMode::I),
                    initial_value: Some(existing_value),
                    cursor_position: Some(0),
                });
                if let Err(ref e) = result {
                    log::error!("Failed to start editing with 'i' key: {:?}", e);
                }
                result
            }
            "a" => {
                // Get existing cell value for append mode
                let existing_value = self.get_cell_display_for_ui(&current_cursor);
                let cursor_pos = existing_value.len();
                log::debug!(
                    "'a' key pressed, starting append mode with existing value: '{}', cursor at {}",
                    existing_value,
                    cursor_pos
                );
                let result = self.dispatch_action(Action::StartEditing {
                    edit_mode: Some(InsertMode::A),
                    initial_value: Some(existing_value),
                    cursor_position: Some(cursor_pos),
                });
                if let Err(ref e) = result {
                    log::error!("Failed to start editing with 'a' key: {:?}", e);
                }
                result
            }
            "Enter" => {
                // Enter key starts editing in Insert mode with empty content
                log::debug!("Enter key pressed, starting edit in Insert mode with empty value");

                let action = Action::StartEditing {
                    edit_mode: Some(InsertMode::I), // Use Insert mode for immediate typing
                    initial_value: Some(String::new()), // Start with empty value to replace content
                    cursor_position: Some(0),
                };

                let result = self.dispatch_action(action);

                if let Err(ref e) = result {
                    log::error!("Failed to start editing with Enter key: {:?}", e);
                }
                result
            }

            // Command mode
            ":" => self.dispatch_action(Action::EnterCommandMode),

            // Visual mode
            "v" => {
                use crate::state::{Selection, SelectionType, SpreadsheetVisualMode};
                self.dispatch_action(Action::EnterSpreadsheetVisualMode {
                    visual_mode: SpreadsheetVisualMode::Char,
                    selection: Selection {
                        selection_type: SelectionType::Cell {
                            address: current_cursor,
                        },
                        anchor: Some(current_cursor),
                    },
                })
            }

            // Navigation
            "ArrowUp" | "k" => {
                log::debug!("Moving cursor up");
                self.move_cursor(0, -1)
            }
            "ArrowDown" | "j" => {
                log::debug!("Moving cursor down");
                self.move_cursor(0, 1)
            }
            "ArrowLeft" | "h" => {
                log::debug!("Moving cursor left");
                self.move_cursor(-1, 0)
            }
            "ArrowRight" | "l" => {
                log::debug!("Moving cursor right");
                self.move_cursor(1, 0)
            }

            // Tab navigation
            "Tab" => {
                if event.shift {
                    // Shift+Tab moves left, then wraps to previous row
                    if current_cursor.col > 0 {
                        self.dispatch_action(Action::UpdateCursor {
                            cursor: CellAddress::new(current_cursor.col - 1, current_cursor.row),
                        })
                    } else if current_cursor.row > 0 {
                        // Wrap to end of previous row (assuming max 256 columns)
                        self.dispatch_action(Action::UpdateCursor {
                            cursor: CellAddress::new(255, current_cursor.row - 1),
                        })
                    } else {
                        Ok(())
                    }
                } else {
                    // Tab moves right, then wraps to next row
                    if current_cursor.col < 255 {
                        self.dispatch_action(Action::UpdateCursor {
                            cursor: CellAddress::new(current_cursor.col + 1, current_cursor.row),
                        })
                    } else if current_cursor.row < 9999 {
                        // Wrap to start of next row
                        self.dispatch_action(Action::UpdateCursor {
                            cursor: CellAddress::new(0, current_cursor.row + 1),
                        })
                    } else {
                        Ok(())
                    }
                }
            }

            // Cell operations
            "Delete" | "Backspace" => {
                // Clear the current cell
                log::debug!(
                    "{} key pressed, clearing cell at {:?}",
                    event.key,
                    current_cursor
                );
                self.facade.set_cell_value(&current_cursor, "")?;
                self.event_dispatcher
                    .dispatch(&SpreadsheetEvent::CellEditCompleted {
                        address: current_cursor,
                        value: String::new(),
                    });

                // Update formula bar to show empty value
                self.update_formula_bar_from_cursor();
                Ok(())
            }

            // Escape does nothing in navigation mode
            "Escape" => Ok(()),

            _ => {
                // Check if this is a vim mode command that should be handled specially
                match event.key.as_str() {
                    // Vim mode commands for entering insert mode
                    "i" => {
                        // Get existing value for the current cell
                        let existing_value = self.get_cell_display_for_ui(&current_cursor);
                        log::debug!("'i' key pressed, entering insert mode at beginning");
                        self.dispatch_action(Action::StartEditing {
                            edit_mode: Some(InsertMode::I),
                            initial_value: Some(existing_value),
                            cursor_position: Some(0), // Cursor at beginning for 'i'
                        })
                    }
                    "a" => {
                        // Get existing value for the current cell
                        let existing_value = self.get_cell_display_for_ui(&current_cursor);
                        let cursor_pos = if existing_value.is_empty() { 0 } else { 1 };
                        log::debug!("'a' key pressed, entering insert mode after first char");
                        self.dispatch_action(Action::StartEditing {
                            edit_mode: Some(InsertMode::A),
                            initial_value: Some(existing_value),
                            cursor_position: Some(cursor_pos),
                        })
                    }
                    "I" => {
                        // Get existing value for the current cell
                        let existing_value = self.get_cell_display_for_ui(&current_cursor);
                        log::debug!("'I' key pressed, entering insert mode at start of line");
                        self.dispatch_action(Action::StartEditing {
                            edit_mode: Some(InsertMode::CapitalI),
                            initial_value: Some(existing_value),
                            cursor_position: Some(0),
                        })
                    }
                    "A" => {
                        // Get existing value for the current cell
                        let existing_value = self.get_cell_display_for_ui(&current_cursor);
                        let cursor_pos = existing_value.len();
                        log::debug!("'A' key pressed, entering insert mode at end of line");
                        self.dispatch_action(Action::StartEditing {
                            edit_mode: Some(InsertMode::CapitalA),
                            initial_value: Some(existing_value),
                            cursor_position: Some(cursor_pos),
                        })
                    }
                    _ => {
                        // Check if this is a single printable character that should start editing
                        if event.key.len() == 1 && !event.ctrl && !event.alt && !event.meta {
                            // Single character typed - start editing with this character
                            log::debug!("Starting edit mode with typed character: '{}'", event.key);
                            let result = self.dispatch_action(Action::StartEditing {
                                edit_mode: Some(InsertMode::I),
                                initial_value: Some(event.key.clone()),
                                cursor_position: Some(1), // Position cursor after the typed character
                            });
                            if let Err(ref e) = result {
                                log::error!(
                                    "Failed to start editing with typed character: {:?}",
                                    e
                                );
                            }
                            result
                        } else {
                            log::debug!("Unhandled navigation key: '{}'", event.key);
                            Ok(())
                        }
                    }
                }
            }
        }
    }

    fn handle_editing_key(&mut self, event: KeyboardEvent) -> Result<()> {
        // Clone the state to avoid borrowing issues
        let state = self.state_machine.get_state().clone();

        if let UIState::Editing {
            cell_mode,
            editing_value,
            cursor_position,
            visual_start,
            visual_type,
            ..
        } = state
        {
            match cell_mode {
                CellMode::Normal => self.handle_cell_normal_key(event, &editing_value, cursor_position),
                CellMode::Insert => self.handle_cell_insert_key(event, &editing_value, cursor_position),
                CellMode::Visual => self.handle_cell_visual_key(
                    event,
                    &editing_value,
                    cursor_position,
                    visual_start.unwrap_or(cursor_position),
                    visual_type.unwrap_or(crate::state::VisualMode::Character),
                ),
            }
        } else {
            Ok(())
        }
    }

    /// Cell-text normal mode: motions, operators (d/c/y), counts, and single-level undo.
    fn handle_cell_normal_key(
        &mut self,
        event: KeyboardEvent,
        text: &str,
        pos: usize,
    ) -> Result<()> {
        // A replacement character consumed by a pending `r`.
        if self.cell_text_pending_op == Some(('r', 0)) {
            self.cell_text_pending_op = None;
            if event.key == "Escape" {
                return Ok(());
            }
            if event.key.len() == 1 && pos < text.len() {
                self.snapshot_cell_text_undo(text, pos);
                let mut chars: Vec<char> = text.chars().collect();
                chars[pos] = event.key.chars().next().unwrap();
                let new_value: String = chars.into_iter().collect();
                return self.dispatch_action(Action::UpdateEditingValue {
                    value: new_value,
                    cursor_position: pos,
                });
            }
            return Ok(());
        }

        if event.key == "Escape" {
            self.cell_text_pending_op = None;
            self.cell_text_pending_textobj = None;
            self.cell_text_count.clear();
            return self.dispatch_action(Action::ExitToNavigation);
        }

        // Digit accumulation (a leading zero is the `0` motion, not a count).
        if let Some(c) = event.key.chars().next() {
            if event.key.len() == 1
                && c.is_ascii_digit()
                && (c != '0' || !self.cell_text_count.is_empty())
            {
                self.cell_text_count.push(c);
                return Ok(());
            }
        }
        let count = self.take_cell_text_count();

        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();

        // A text object (`iw`/`aw`, `i"`/`a(`, ...) awaiting its object character.
        if let (Some((op, _)), Some(prefix)) =
            (self.cell_text_pending_op, self.cell_text_pending_textobj)
        {
            self.cell_text_pending_textobj = None;
            self.cell_text_pending_op = None;
            if let Some(object) = event.key.chars().next() {
                if event.key.len() == 1 {
                    if let Some((start, end)) = Self::text_object_range(&chars, pos, prefix, object)
                    {
                        return self.apply_cell_operator_char(op, text, start, end);
                    }
                }
            }
            return Ok(());
        }

        // Doubled operators (dd/cc/yy) act on the whole value.
        if let Some((op, op_count)) = self.cell_text_pending_op {
            if event.key == op.to_string() && matches!(op, 'd' | 'c' | 'y') {
                self.cell_text_pending_op = None;
                return self.apply_cell_operator_char(op, text, 0, len);
            }
            if (event.key == "i" || event.key == "a") && event.key.len() == 1 {
                self.cell_text_pending_textobj = Some(event.key.chars().next().unwrap());
                return Ok(());
            }
            let total_count = op_count.max(1) * count.max(1);
            if let Some((target, inclusive)) =
                Self::motion_target_n(&chars, pos, event.key.as_str(), total_count)
            {
                self.cell_text_pending_op = None;
                let (start, end) = Self::operator_range(pos, target, inclusive, len);
                return self.apply_cell_operator_char(op, text, start, end);
            }
            // Unrecognized key while an operator is pending cancels it.
            self.cell_text_pending_op = None;
        }

        match event.key.as_str() {
            "i" => self.dispatch_action(Action::EnterInsertMode {
                mode: Some(InsertMode::I),
            }),
            "a" => {
                let new_pos = if len == 0 { 0 } else { (pos + 1).min(len) };
                self.dispatch_action(Action::UpdateEditingValue {
                    value: text.to_string(),
                    cursor_position: new_pos,
                })?;
                self.dispatch_action(Action::EnterInsertMode {
                    mode: Some(InsertMode::A),
                })
            }
            "I" => {
                self.dispatch_action(Action::UpdateEditingValue {
                    value: text.to_string(),
                    cursor_position: 0,
                })?;
                self.dispatch_action(Action::EnterInsertMode {
                    mode: Some(InsertMode::CapitalI),
                })
            }
            "A" => {
                self.dispatch_action(Action::UpdateEditingValue {
                    value: text.to_string(),
                    cursor_position: len,
                })?;
                self.dispatch_action(Action::EnterInsertMode {
                    mode: Some(InsertMode::CapitalA),
                })
            }
            "r" => {
                self.cell_text_pending_op = Some(('r', 0));
                Ok(())
            }
            "R" => self.dispatch_action(Action::EnterInsertMode {
                mode: Some(InsertMode::I),
            }),
            "d" | "c" | "y" => {
                self.cell_text_pending_op = Some((event.key.chars().next().unwrap(), count));
                Ok(())
            }
            "x" => {
                if pos < len {
                    let end = (pos + count.max(1)).min(len);
                    self.apply_cell_operator("d", text, pos, end)
                } else {
                    Ok(())
                }
            }
            "p" => self.paste_cell_register(text, pos, true),
            "P" => self.paste_cell_register(text, pos, false),
            "u" => self.undo_cell_text(),
            "v" => self.dispatch_action(Action::EnterVisualMode {
                visual_type: crate::state::VisualMode::Character,
                anchor: Some(pos),
            }),
            "V" => self.dispatch_action(Action::EnterVisualMode {
                visual_type: crate::state::VisualMode::Line,
                anchor: Some(0),
            }),
            "h" | "l" | "0" | "$" | "w" | "b" | "e" | "ArrowLeft" | "ArrowRight" => {
                if let Some((target, _)) = Self::motion_target_n(&chars, pos, event.key.as_str(), count) {
                    let new_pos = Self::clamp_normal_cursor(len, target);
                    self.dispatch_action(Action::UpdateEditingValue {
                        value: text.to_string(),
                        cursor_position: new_pos,
                    })
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }

    /// Apply an `x`/`d`/`c`/`y` operator over the half-open byte range `[start, end)` of `text`.
    fn apply_cell_operator(&mut self, op: &str, text: &str, start: usize, end: usize) -> Result<()> {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let start = start.min(len);
        let end = end.min(len).max(start);

        if op != "y" {
            self.snapshot_cell_text_undo(text, start);
        }

        let removed: String = chars[start..end].iter().collect();
        self.cell_text_register = Some(removed);

        match op {
            "y" => {
                let new_pos = Self::clamp_normal_cursor(len, start);
                self.dispatch_action(Action::UpdateEditingValue {
                    value: text.to_string(),
                    cursor_position: new_pos,
                })
            }
            "d" => {
                let mut new_chars = chars;
                new_chars.drain(start..end);
                let new_value: String = new_chars.into_iter().collect();
                let new_pos = Self::clamp_normal_cursor(new_value.chars().count(), start);
                self.dispatch_action(Action::UpdateEditingValue {
                    value: new_value,
                    cursor_position: new_pos,
                })
            }
            "c" => {
                let mut new_chars = chars;
                new_chars.drain(start..end);
                let new_value: String = new_chars.into_iter().collect();
                self.dispatch_action(Action::UpdateEditingValue {
                    value: new_value,
                    cursor_position: start,
                })?;
                self.dispatch_action(Action::EnterInsertMode {
                    mode: Some(InsertMode::I),
                })
            }
            _ => Ok(()),
        }
    }

    fn apply_cell_operator_char(&mut self, op: char, text: &str, start: usize, end: usize) -> Result<()> {
        self.apply_cell_operator(&op.to_string(), text, start, end)
    }

    fn paste_cell_register(&mut self, text: &str, pos: usize, after: bool) -> Result<()> {
        let Some(register) = self.cell_text_register.clone() else {
            return Ok(());
        };
        self.snapshot_cell_text_undo(text, pos);
        let mut chars: Vec<char> = text.chars().collect();
        let insert_at = if after && !chars.is_empty() {
            (pos + 1).min(chars.len())
        } else {
            pos.min(chars.len())
        };
        let inserted_len = register.chars().count();
        for (i, c) in register.chars().enumerate() {
            chars.insert(insert_at + i, c);
        }
        let new_value: String = chars.into_iter().collect();
        let new_pos = Self::clamp_normal_cursor(
            new_value.chars().count(),
            insert_at + inserted_len.saturating_sub(1),
        );
        self.dispatch_action(Action::UpdateEditingValue {
            value: new_value,
            cursor_position: new_pos,
        })
    }

    fn snapshot_cell_text_undo(&mut self, text: &str, pos: usize) {
        self.cell_text_undo = Some((text.to_string(), pos));
    }

    fn undo_cell_text(&mut self) -> Result<()> {
        if let Some((value, pos)) = self.cell_text_undo.take() {
            let new_pos = Self::clamp_normal_cursor(value.chars().count(), pos);
            self.dispatch_action(Action::UpdateEditingValue {
                value,
                cursor_position: new_pos,
            })
        } else {
            Ok(())
        }
    }

    fn take_cell_text_count(&mut self) -> usize {
        if self.cell_text_count.is_empty() {
            1
        } else {
            let n = self.cell_text_count.parse().unwrap_or(1);
            self.cell_text_count.clear();
            n.max(1)
        }
    }

    fn clamp_normal_cursor(len: usize, pos: usize) -> usize {
        if len == 0 {
            0
        } else {
            pos.min(len - 1)
        }
    }

    fn char_class(c: char) -> u8 {
        if c.is_whitespace() {
            0
        } else if c.is_alphanumeric() || c == '_' {
            1
        } else {
            2
        }
    }

    fn word_forward(chars: &[char], pos: usize) -> usize {
        let len = chars.len();
        if pos >= len {
            return len;
        }
        let mut p = pos;
        let start_class = Self::char_class(chars[p]);
        if start_class != 0 {
            while p < len && Self::char_class(chars[p]) == start_class {
                p += 1;
            }
        } else {
            p += 1;
        }
        while p < len && Self::char_class(chars[p]) == 0 {
            p += 1;
        }
        p
    }

    fn word_backward(chars: &[char], pos: usize) -> usize {
        if pos == 0 {
            return 0;
        }
        let mut p = pos - 1;
        while p > 0 && Self::char_class(chars[p]) == 0 {
            p -= 1;
        }
        if p == 0 {
            return 0;
        }
        let class = Self::char_class(chars[p]);
        while p > 0 && Self::char_class(chars[p - 1]) == class {
            p -= 1;
        }
        p
    }

    fn word_end(chars: &[char], pos: usize) -> usize {
        let len = chars.len();
        if len == 0 {
            return 0;
        }
        let mut p = (pos + 1).min(len);
        while p < len && Self::char_class(chars[p]) == 0 {
            p += 1;
        }
        if p >= len {
            return len - 1;
        }
        let class = Self::char_class(chars[p]);
        while p + 1 < len && Self::char_class(chars[p + 1]) == class {
            p += 1;
        }
        p
    }

    /// A single-step motion target. `inclusive` marks motions (`e`, `$`) whose
    /// landing character is included when used as an operator's end bound.
    fn motion_target(chars: &[char], pos: usize, key: &str) -> Option<(usize, bool)> {
        let len = chars.len();
        match key {
            "h" | "ArrowLeft" => Some((pos.saturating_sub(1), false)),
            "l" | "ArrowRight" => Some(((pos + 1).min(len), false)),
            "0" => Some((0, false)),
            "$" => Some((len.saturating_sub(1), true)),
            "w" => Some((Self::word_forward(chars, pos), false)),
            "b" => Some((Self::word_backward(chars, pos), false)),
            "e" => Some((Self::word_end(chars, pos), true)),
            _ => None,
        }
    }

    fn motion_target_n(
        chars: &[char],
        pos: usize,
        key: &str,
        count: usize,
    ) -> Option<(usize, bool)> {
        if matches!(key, "0" | "$") {
            return Self::motion_target(chars, pos, key);
        }
        let mut cur = pos;
        let mut inclusive = false;
        for _ in 0..count.max(1) {
            let (t, inc) = Self::motion_target(chars, cur, key)?;
            cur = t;
            inclusive = inc;
        }
        Some((cur, inclusive))
    }

    /// Turn a motion landing position into a half-open `[start, end)` operator range.
    fn operator_range(pos: usize, target: usize, inclusive: bool, len: usize) -> (usize, usize) {
        if target >= pos {
            let end = if inclusive { target + 1 } else { target };
            (pos, end.min(len))
        } else {
            (target, pos)
        }
    }

    /// Resolve a text object (`iw`/`aw`, `i"`/`a"`, `i(`/`a(`, ...) to a half-open
    /// `[start, end)` range. `kind` is `'i'` (inner) or `'a'` (around).
    fn text_object_range(
        chars: &[char],
        pos: usize,
        kind: char,
        object: char,
    ) -> Option<(usize, usize)> {
        let around = kind == 'a';
        match object {
            'w' | 'W' => Self::text_object_word(chars, pos, around),
            '"' => Self::text_object_quote(chars, pos, '"', around),
            '\'' => Self::text_object_quote(chars, pos, '\'', around),
            '`' => Self::text_object_quote(chars, pos, '`', around),
            '(' | ')' | 'b' => Self::text_object_pair(chars, pos, '(', ')', around),
            '[' | ']' => Self::text_object_pair(chars, pos, '[', ']', around),
            '{' | '}' | 'B' => Self::text_object_pair(chars, pos, '{', '}', around),
            '<' | '>' => Self::text_object_pair(chars, pos, '<', '>', around),
            _ => None,
        }
    }

    fn text_object_word(chars: &[char], pos: usize, around: bool) -> Option<(usize, usize)> {
        if chars.is_empty() {
            return None;
        }
        let p = pos.min(chars.len() - 1);
        let class = Self::char_class(chars[p]);
        let mut start = p;
        while start > 0 && Self::char_class(chars[start - 1]) == class {
            start -= 1;
        }
        let mut end = p;
        while end + 1 < chars.len() && Self::char_class(chars[end + 1]) == class {
            end += 1;
        }
        end += 1;

        if !around {
            return Some((start, end));
        }
        let mut around_end = end;
        while around_end < chars.len() && chars[around_end].is_whitespace() {
            around_end += 1;
        }
        if around_end > end {
            return Some((start, around_end));
        }
        let mut around_start = start;
        while around_start > 0 && chars[around_start - 1].is_whitespace() {
            around_start -= 1;
        }
        Some((around_start, end))
    }

    /// Nearest `open`/`close` pair enclosing `pos`, matched with nesting depth.
    fn text_object_pair(
        chars: &[char],
        pos: usize,
        open: char,
        close: char,
        around: bool,
    ) -> Option<(usize, usize)> {
        if chars.is_empty() {
            return None;
        }
        let idx = pos.min(chars.len() - 1);

        let mut depth = 0i32;
        let mut start = None;
        let mut i = idx as isize;
        while i >= 0 {
            let c = chars[i as usize];
            if c == close && i as usize != idx {
                depth += 1;
            } else if c == open {
                if depth == 0 {
                    start = Some(i as usize);
                    break;
                }
                depth -= 1;
            }
            i -= 1;
        }
        let start = start?;

        let mut depth = 0i32;
        let mut end = None;
        for (i, &c) in chars.iter().enumerate().skip(start + 1) {
            if c == open {
                depth += 1;
            } else if c == close {
                if depth == 0 {
                    end = Some(i);
                    break;
                }
                depth -= 1;
            }
        }
        let end = end?;

        if around {
            Some((start, end + 1))
        } else {
            Some((start + 1, end))
        }
    }

    /// Nearest `quote`-delimited pair containing or following `pos`.
    fn text_object_quote(
        chars: &[char],
        pos: usize,
        quote: char,
        around: bool,
    ) -> Option<(usize, usize)> {
        let positions: Vec<usize> = chars
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == quote)
            .map(|(i, _)| i)
            .collect();

        let mut pair = None;
        let mut k = 0;
        while k + 1 < positions.len() {
            let (a, b) = (positions[k], positions[k + 1]);
            if pos >= a && pos <= b {
                pair = Some((a, b));
                break;
            }
            if a > pos {
                pair = Some((a, b));
                break;
            }
            k += 2;
        }
        let (a, b) = pair?;

        if around {
            Some((a, b + 1))
        } else {
            Some((a + 1, b))
        }
    }

    /// Cell-text insert mode: character typing plus cursor motion.
    fn handle_cell_insert_key(
        &mut self,
        event: KeyboardEvent,
        text: &str,
        pos: usize,
    ) -> Result<()> {
        if event.key == "Escape" {
            let len = text.chars().count();
            let new_pos = Self::clamp_normal_cursor(len, pos.saturating_sub(1));
            self.dispatch_action(Action::UpdateEditingValue {
                value: text.to_string(),
                cursor_position: new_pos,
            })?;
            return self.dispatch_action(Action::ExitInsertMode);
        }

        if event.is_printable() {
            let mut new_value = text.to_string();
            new_value.insert_str(pos, &event.key);
            self.dispatch_action(Action::UpdateEditingValue {
                value: new_value,
                cursor_position: pos + 1,
            })
        } else {
            match event.key.as_str() {
                "Backspace" => {
                    if pos > 0 {
                        let mut new_value = text.to_string();
                        new_value.remove(pos - 1);
                        self.dispatch_action(Action::UpdateEditingValue {
                            value: new_value,
                            cursor_position: pos - 1,
                        })
                    } else {
                        Ok(())
                    }
                }
                "Delete" => {
                    let len = text.chars().count();
                    if pos < len {
                        let mut new_value = text.to_string();
                        new_value.remove(pos);
                        self.dispatch_action(Action::UpdateEditingValue {
                            value: new_value,
                            cursor_position: pos,
                        })
                    } else {
                        Ok(())
                    }
                }
                "ArrowLeft" => {
                    if pos > 0 {
                        self.dispatch_action(Action::UpdateEditingValue {
                            value: text.to_string(),
                            cursor_position: pos - 1,
                        })
                    } else {
                        Ok(())
                    }
                }
                "ArrowRight" => {
                    let len = text.chars().count();
                    if pos < len {
                        self.dispatch_action(Action::UpdateEditingValue {
                            value: text.to_string(),
                            cursor_position: pos + 1,
                        })
                    } else {
                        Ok(())
                    }
                }
                "Home" => self.dispatch_action(Action::UpdateEditingValue {
                    value: text.to_string(),
                    cursor_position: 0,
                }),
                "End" => {
                    let len = text.chars().count();
                    self.dispatch_action(Action::UpdateEditingValue {
                        value: text.to_string(),
                        cursor_position: len,
                    })
                }
                "Enter" => {
                    // Complete editing and move down
                    self.complete_editing()?;
                    self.move_cursor(0, 1)
                }
                _ => Ok(()),
            }
        }
    }

    /// Cell-text visual mode: extend the selection with motions, then act on it.
    fn handle_cell_visual_key(
        &mut self,
        event: KeyboardEvent,
        text: &str,
        pos: usize,
        anchor: usize,
        visual_type: crate::state::VisualMode,
    ) -> Result<()> {
        if event.key == "Escape" {
            self.cell_text_pending_textobj = None;
            return self.dispatch_action(Action::ExitVisualMode);
        }

        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();

        if let Some(c) = event.key.chars().next() {
            if event.key.len() == 1 && c.is_ascii_digit() && (c != '0' || !self.cell_text_count.is_empty()) {
                self.cell_text_count.push(c);
                return Ok(());
            }
        }
        let count = self.take_cell_text_count();

        // A text object (`iw`/`aw`, `i"`/`a(`, ...) awaiting its object character.
        if let Some(prefix) = self.cell_text_pending_textobj {
            self.cell_text_pending_textobj = None;
            if let Some(object) = event.key.chars().next() {
                if event.key.len() == 1 {
                    if let Some((obj_start, obj_end)) =
                        Self::text_object_range(&chars, pos, prefix, object)
                    {
                        self.dispatch_action(Action::ExitVisualMode)?;
                        self.dispatch_action(Action::EnterVisualMode {
                            visual_type,
                            anchor: Some(obj_start),
                        })?;
                        let new_pos = obj_end.saturating_sub(1).max(obj_start);
                        return self.dispatch_action(Action::UpdateEditingValue {
                            value: text.to_string(),
                            cursor_position: new_pos,
                        });
                    }
                }
            }
            return Ok(());
        }
        if event.key == "i" || event.key == "a" {
            self.cell_text_pending_textobj = Some(event.key.chars().next().unwrap());
            return Ok(());
        }

        // Line-visual always spans the whole value, regardless of where the cursor wandered.
        let (start, end) = if visual_type == crate::state::VisualMode::Line {
            (0, len)
        } else {
            (anchor.min(pos), (anchor.max(pos) + 1).min(len))
        };

        match event.key.as_str() {
            "h" | "l" | "0" | "$" | "w" | "b" | "e" | "ArrowLeft" | "ArrowRight" => {
                if let Some((target, _)) = Self::motion_target_n(&chars, pos, event.key.as_str(), count) {
                    let new_pos = Self::clamp_normal_cursor(len, target);
                    self.dispatch_action(Action::UpdateEditingValue {
                        value: text.to_string(),
                        cursor_position: new_pos,
                    })
                } else {
                    Ok(())
                }
            }
            "d" | "x" => {
                self.apply_cell_operator_char('d', text, start, end)?;
                self.dispatch_action(Action::ExitVisualMode)
            }
            "c" => {
                self.dispatch_action(Action::ExitVisualMode)?;
                self.apply_cell_operator_char('c', text, start, end)
            }
            "y" => {
                self.apply_cell_operator_char('y', text, start, end)?;
                self.dispatch_action(Action::ExitVisualMode)
            }
            "v" | "V" => self.dispatch_action(Action::ExitVisualMode),
            _ => Ok(()),
        }
    }

    fn handle_insert_key(&mut self, event: KeyboardEvent) -> Result<()> {
        let state = self.state_machine.get_state().clone();

        if let UIState::Editing {
            editing_value,
            cursor_position,
            ..
        } = state
        {
            return self.handle_cell_insert_key(event, &editing_value, cursor_position);
        }

        // UIState::Insert (structural row/column insert) only reacts to Escape here;
        // confirming the insert goes through StructuralOperations, not the key handler.
        match event.key.as_str() {
            "Escape" => self.dispatch_action(Action::CancelInsert),
            "Enter" => self.dispatch_action(Action::ConfirmInsert),
            _ => Ok(()),
        }
    }

    fn handle_command_key(&mut self, event: KeyboardEvent) -> Result<()> {
        if event.key == "Escape" {
            return self.dispatch_action(Action::ExitCommandMode);
        }

        if let UIState::Command { command_value, .. } = self.state_machine.get_state() {
            if event.is_printable() {
                let mut new_value = command_value.clone();
                new_value.push_str(&event.key);
                self.dispatch_action(Action::UpdateCommandValue { value: new_value })
            } else if event.key == "Enter" {
                // Execute command
                self.event_dispatcher
                    .dispatch(&SpreadsheetEvent::CommandExecuted {
                        command: command_value.clone(),
                    });
                self.dispatch_action(Action::ExitCommandMode)
            } else if event.key == "Backspace" && !command_value.is_empty() {
                let mut new_value = command_value.clone();
                new_value.pop();
                self.dispatch_action(Action::UpdateCommandValue { value: new_value })
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }

    fn handle_visual_key(&mut self, event: KeyboardEvent) -> Result<()> {
        let state = self.state_machine.get_state().clone();

        if let UIState::Editing {
            editing_value,
            cursor_position,
            visual_start,
            visual_type,
            ..
        } = state
        {
            return self.handle_cell_visual_key(
                event,
                &editing_value,
                cursor_position,
                visual_start.unwrap_or(cursor_position),
                visual_type.unwrap_or(crate::state::VisualMode::Character),
            );
        }

        if event.key == "Escape" {
            return self.dispatch_action(Action::ExitSpreadsheetVisualMode);
        }

        if let UIState::Visual { cursor, anchor, .. } = state {
            let (delta_col, delta_row) = match event.key.as_str() {
                "h" | "ArrowLeft" => (-1, 0),
                "l" | "ArrowRight" => (1, 0),
                "k" | "ArrowUp" => (0, -1),
                "j" | "ArrowDown" => (0, 1),
                _ => (0, 0),
            };
            if delta_col != 0 || delta_row != 0 {
                let new_col = (cursor.col as i32 + delta_col).max(0) as u32;
                let new_row = (cursor.row as i32 + delta_row).max(0) as u32;
                let new_cursor = CellAddress::new(new_col, new_row);

                self.dispatch_action(Action::UpdateCursor { cursor: new_cursor })?;

                use crate::state::{Selection, SelectionType};
                let start = CellAddress::new(anchor.col.min(new_col), anchor.row.min(new_row));
                let end = CellAddress::new(anchor.col.max(new_col), anchor.row.max(new_row));
                self.dispatch_action(Action::UpdateSelection {
                    selection: Selection {
                        selection_type: SelectionType::Range { start, end },
                        anchor: Some(anchor),
                    },
                })
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }

    fn move_cursor(&mut self, delta_col: i32, delta_row: i32) -> Result<()> {
        let current = self.state_machine.get_state().cursor();
        let new_col = (current.col as i32 + delta_col).max(0) as u32;
        let new_row = (current.row as i32 + delta_row).max(0) as u32;
        let new_cursor = CellAddress::new(new_col, new_row);

        log::debug!(
            "move_cursor: delta=({}, {}), current=({}, {}), new=({}, {})",
            delta_col,
            delta_row,
            current.col,
            current.row,
            new_col,
            new_row
        );

        self.viewport_manager.ensure_visible(&new_cursor);

        self.event_dispatcher
            .dispatch(&SpreadsheetEvent::CursorMoved {
                from: *current,
                to: new_cursor,
            });

        self.dispatch_action(Action::UpdateCursor { cursor: new_cursor })?;

        // Update formula bar to show new cell's content
        self.update_formula_bar_from_cursor();

        Ok(())
    }

    fn complete_editing(&mut self) -> Result<()> {
        if let UIState::Editing {
            cursor,
            editing_value,
            ..
        } = self.state_machine.get_state()
        {
            let address = *cursor;
            let value = editing_value.clone();

            // Update the cell value in the facade and handle errors
            match self.facade.set_cell_value(&address, &value) {
                Ok(_) => {
                    // Check if the cell now contains an error value (e.g., from formula evaluation)
                    if let Some(gridcore_core::types::CellValue::Error(error_type)) =
                        self.facade.get_cell_raw_value(&address)
                    {
                        // Use the ErrorType's built-in full_display method
                        let enhanced_message =
                            format!("Formula error: {}", error_type.full_display());

                        log::error!("Error in cell {}: {}", address, enhanced_message);

                        // Emit error event for formula evaluation errors
                        self.emit_error(
                            enhanced_message,
                            crate::controller::events::ErrorSeverity::Error,
                        );
                    }

                    self.event_dispatcher
                        .dispatch(&SpreadsheetEvent::CellEditCompleted { address, value });
                }
                Err(e) => {
                    // Use ErrorFormatter to get consistent error messages
                    let message = ErrorFormatter::format_error(&e);
                    log::error!("Parse/Set error in cell {}: {}", address, message);

                    // Emit error event for setting errors
                    self.emit_error(message, crate::controller::events::ErrorSeverity::Error);
                    // Still exit editing mode even if the value couldn't be set
                }
            }

            self.dispatch_action(Action::ExitToNavigation)
        } else {
            Ok(())
        }
    }

    // Mouse event handling
    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        if let Some(cell) = self.viewport_manager.viewport_to_cell(event.x, event.y) {
            match event.event_type {
                crate::controller::events::MouseEventType::Click => {
                    self.event_dispatcher
                        .dispatch(&SpreadsheetEvent::CursorMoved {
                            from: *self.state_machine.get_state().cursor(),
                            to: cell,
                        });
                    self.dispatch_action(Action::UpdateCursor { cursor: cell })
                }
                crate::controller::events::MouseEventType::DoubleClick => {
                    self.dispatch_action(Action::UpdateCursor { cursor: cell })?;
                    self.dispatch_action(Action::StartEditing {
                        edit_mode: Some(InsertMode::I),
                        initial_value: None,
                        cursor_position: None,
                    })
                }
                _ => Ok(()),
            }
        } else {
            Ok(())
        }
    }
}

impl Default for SpreadsheetController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod sheet_tests {
    use super::*;
    use crate::controller::events::ErrorSeverity;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_get_sheets() {
        let controller = SpreadsheetController::new();
        let sheets = controller.get_sheets();

        // Should have at least one default sheet
        assert!(!sheets.is_empty());
        assert_eq!(sheets[0].0, "Sheet1");
    }

    #[test]
    fn test_add_sheet() {
        let mut controller = SpreadsheetController::new();

        // Add a new sheet
        let result = controller.add_sheet("TestSheet");
        assert!(result.is_ok());

        // Verify sheet was added
        let sheets = controller.get_sheets();
        assert!(sheets.iter().any(|(name, _)| name == "TestSheet"));
    }

    #[test]
    fn test_remove_sheet() {
        let mut controller = SpreadsheetController::new();

        // Add sheets
        controller.add_sheet("Sheet2").unwrap();
        controller.add_sheet("Sheet3").unwrap();

        // Remove a sheet
        let result = controller.remove_sheet("Sheet2");
        assert!(result.is_ok());

        // Verify sheet was removed
        let sheets = controller.get_sheets();
        assert!(!sheets.iter().any(|(name, _)| name == "Sheet2"));
        assert!(sheets.iter().any(|(name, _)| name == "Sheet3"));
    }

    #[test]
    fn test_rename_sheet() {
        let mut controller = SpreadsheetController::new();

        // Add a sheet
        controller.add_sheet("OldName").unwrap();

        // Rename it
        let result = controller.rename_sheet("OldName", "NewName");
        assert!(result.is_ok());

        // Verify rename
        let sheets = controller.get_sheets();
        assert!(!sheets.iter().any(|(name, _)| name == "OldName"));
        assert!(sheets.iter().any(|(name, _)| name == "NewName"));
    }

    #[test]
    fn test_set_active_sheet() {
        let mut controller = SpreadsheetController::new();

        // Add multiple sheets
        controller.add_sheet("Sheet2").unwrap();
        controller.add_sheet("Sheet3").unwrap();

        // Set active sheet
        let result = controller.set_active_sheet("Sheet2");
        assert!(result.is_ok());

        // Verify active sheet
        let active = controller.get_active_sheet();
        assert_eq!(active, "Sheet2");
    }

    #[test]
    fn test_sheet_count() {
        let mut controller = SpreadsheetController::new();

        let initial_count = controller.sheet_count();
        assert!(initial_count > 0);

        // Add sheets
        controller.add_sheet("Sheet2").unwrap();
        controller.add_sheet("Sheet3").unwrap();

        // Verify count increased
        assert_eq!(controller.sheet_count(), initial_count + 2);
    }

    #[test]
    fn test_sheet_events() {
        let mut controller = SpreadsheetController::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        // Subscribe to events
        controller.subscribe_to_events(move |event| {
            let mut e = events_clone.lock().unwrap();
            e.push(format!("{:?}", event));
        });

        // Add a sheet
        controller.add_sheet("TestSheet").unwrap();

        // Check that SheetAdded event was dispatched
        let e = events.lock().unwrap();
        assert!(e.iter().any(|s| s.contains("SheetAdded")));
        assert!(e.iter().any(|s| s.contains("TestSheet")));
    }

    #[test]
    fn test_sheet_actions() {
        let mut controller = SpreadsheetController::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        // Subscribe to events
        controller.subscribe_to_events(move |event| {
            let mut e = events_clone.lock().unwrap();
            e.push(format!("{:?}", event));
        });

        // Test AddSheet action
        controller
            .dispatch_action(Action::AddSheet {
                name: "NewSheet".to_string(),
            })
            .unwrap();

        let sheets = controller.get_sheets();
        assert!(sheets.iter().any(|(name, _)| name == "NewSheet"));

        // Test RenameSheet action
        controller
            .dispatch_action(Action::RenameSheet {
                old_name: "NewSheet".to_string(),
                new_name: "RenamedSheet".to_string(),
            })
            .unwrap();

        let sheets = controller.get_sheets();
        assert!(sheets.iter().any(|(name, _)| name == "RenamedSheet"));

        // Test SetActiveSheet action
        controller
            .dispatch_action(Action::SetActiveSheet {
                name: "RenamedSheet".to_string(),
            })
            .unwrap();

        assert_eq!(controller.get_active_sheet(), "RenamedSheet");

        // Verify events were dispatched
        let e = events.lock().unwrap();
        assert!(e.iter().any(|s| s.contains("SheetAdded")));
        assert!(e.iter().any(|s| s.contains("SheetRenamed")));
        assert!(e.iter().any(|s| s.contains("SheetChanged")));
    }

    #[test]
    fn test_remove_last_sheet_fails() {
        let mut controller = SpreadsheetController::new();

        // Get initial sheets
        let sheets = controller.get_sheets();
        if sheets.len() == 1 {
            // Try to remove the last sheet - should fail
            let result = controller.remove_sheet(&sheets[0].0);
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_error_manager_integration() {
        let mut controller = SpreadsheetController::new();

        // Add an error
        controller.emit_error("Test error".to_string(), ErrorSeverity::Error);

        // Check that error was added
        let errors = controller.get_active_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Test error");

        // Add warning
        controller.emit_error("Test warning".to_string(), ErrorSeverity::Warning);

        // Check both are present
        let errors = controller.get_active_errors();
        assert_eq!(errors.len(), 2);

        // Clear all errors
        controller.clear_all_errors();
        let errors = controller.get_active_errors();
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn test_error_removal() {
        let mut controller = SpreadsheetController::new();

        // Add multiple errors
        controller.emit_error("Error 1".to_string(), ErrorSeverity::Error);
        controller.emit_error("Error 2".to_string(), ErrorSeverity::Warning);
        controller.emit_error("Error 3".to_string(), ErrorSeverity::Info);

        let errors = controller.get_active_errors();
        assert_eq!(errors.len(), 3);

        // Remove middle error
        let error_id = errors[1].id;
        assert!(controller.remove_error(error_id));

        // Check that only 2 remain
        let errors = controller.get_active_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "Error 1");
        assert_eq!(errors[1].message, "Error 3");

        // Try to remove non-existent error
        assert!(!controller.remove_error(999));
    }

    #[test]
    fn test_error_events() {
        let mut controller = SpreadsheetController::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        // Subscribe to events
        controller.subscribe_to_events(move |event| {
            let mut e = events_clone.lock().unwrap();
            e.push(format!("{:?}", event));
        });

        // Emit an error
        controller.emit_error("Test error".to_string(), ErrorSeverity::Error);

        // Check that ErrorOccurred event was dispatched
        let e = events.lock().unwrap();
        assert!(e.iter().any(|s| s.contains("ErrorOccurred")));
        assert!(e.iter().any(|s| s.contains("Test error")));
    }
}

#[cfg(test)]
mod vim_cell_text_tests {
    use super::*;
    use gridcore_core::types::CellAddress;

    fn editing_value(controller: &SpreadsheetController) -> (String, usize) {
        match controller.get_state() {
            UIState::Editing {
                editing_value,
                cursor_position,
                ..
            } => (editing_value.clone(), *cursor_position),
            other => panic!("expected Editing state, got {:?}", other),
        }
    }

    fn press(controller: &mut SpreadsheetController, key: &str) {
        controller
            .handle_keyboard_event(KeyboardEvent::new(key.to_string()))
            .unwrap();
    }

    fn start_editing(controller: &mut SpreadsheetController, value: &str) {
        let addr = CellAddress::new(0, 0);
        controller.facade_mut().set_cell_value(&addr, value).unwrap();
        press(controller, "i");
    }

    #[test]
    fn test_diw_deletes_inner_word() {
        let mut controller = SpreadsheetController::new();
        start_editing(&mut controller, "foo bar baz");
        press(&mut controller, "Escape"); // back to cell-normal mode
        for _ in 0..4 {
            press(&mut controller, "l"); // cursor onto 'b' of "bar"
        }
        press(&mut controller, "d");
        press(&mut controller, "i");
        press(&mut controller, "w");

        let (value, _) = editing_value(&controller);
        assert_eq!(value, "foo  baz");
    }

    #[test]
    fn test_daw_deletes_around_word_with_trailing_space() {
        let mut controller = SpreadsheetController::new();
        start_editing(&mut controller, "foo bar baz");
        press(&mut controller, "Escape");
        for _ in 0..4 {
            press(&mut controller, "l");
        }
        press(&mut controller, "d");
        press(&mut controller, "a");
        press(&mut controller, "w");

        let (value, _) = editing_value(&controller);
        assert_eq!(value, "foo baz");
    }

    #[test]
    fn test_ci_quote_changes_inner_quoted_text() {
        let mut controller = SpreadsheetController::new();
        start_editing(&mut controller, "say \"hello\" now");
        press(&mut controller, "Escape");
        for _ in 0..5 {
            press(&mut controller, "l"); // cursor inside the quotes
        }
        press(&mut controller, "c");
        press(&mut controller, "i");
        press(&mut controller, "\"");

        let (value, _) = editing_value(&controller);
        assert_eq!(value, "say \"\" now");
    }

    #[test]
    fn test_yi_paren_yanks_inner_parens_for_paste() {
        let mut controller = SpreadsheetController::new();
        start_editing(&mut controller, "f(x, y)");
        press(&mut controller, "Escape");
        press(&mut controller, "0");
        for _ in 0..2 {
            press(&mut controller, "l"); // cursor on 'x'
        }
        press(&mut controller, "y");
        press(&mut controller, "i");
        press(&mut controller, "b");
        press(&mut controller, "0");
        press(&mut controller, "p");

        let (value, _) = editing_value(&controller);
        assert_eq!(value, "fx, y(x, y)");
    }
}
