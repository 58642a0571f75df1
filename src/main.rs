//! Card Order entry point
//!
//! Web: builds the page from the board and wires DOM events to it. The host
//! page provides `#board`, `#coin-count`, `#theme-toggle`, `#settings-btn`,
//! `#settings-panel` (with `#container-count`, `#settings-fields`,
//! `#apply-settings`, `#settings-error`, `#close-settings`),
//! `#settings-overlay`, `#reset-progress`, `#mute-toggle` and `#volume`.
//! Native: plays one scripted round and prints the saved state.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, DragEvent, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, KeyboardEvent,
        MouseEvent, TouchEvent,
    };

    use card_order::audio::{AudioManager, SoundEffect};
    use card_order::game::{
        Board, Container, DragController, DragFeedback, GameEvent, PointerInput, PointerPhase,
        PointerSource, SlotLayout, SlotRef,
    };
    use card_order::persistence::{
        KeyValueStore, MemoryStore, SaveReason, SaveScheduler, clear_game_state, load_game_state,
        save_game_state,
    };
    use card_order::{ContainerSettings, Settings, SettingsPanel, Theme, WinningMode, platform};

    /// Scheduler poll interval (ms)
    const POLL_INTERVAL_MS: i32 = 250;

    /// Page state shared by every DOM callback
    struct App {
        board: Board,
        /// Events published by the board, handled after each board call
        events: Rc<RefCell<Vec<GameEvent>>>,
        drag: DragController,
        layout: SlotLayout,
        panel: SettingsPanel,
        scheduler: SaveScheduler,
        store: Box<dyn KeyValueStore>,
        theme: Theme,
        audio: AudioManager,
    }

    impl App {
        fn document() -> Document {
            web_sys::window().expect("no window").document().expect("no document")
        }

        /// Feed a pointer event to the drag controller
        fn handle_pointer(&mut self, input: PointerInput) {
            match input.phase {
                PointerPhase::Start if !self.drag.is_dragging() => {
                    self.audio.resume();
                    self.measure_layout();
                }
                // The page may have scrolled since the drag began
                PointerPhase::End if self.drag.is_dragging() => self.measure_layout(),
                _ => {}
            }
            let feedback = self.drag.handle(input, &self.layout, &mut self.board);
            if let Some(effect) = SoundEffect::for_drag(&feedback) {
                self.audio.play(effect);
            }

            match feedback {
                DragFeedback::Started(origin) => self.highlight(Some(origin), "dragging"),
                DragFeedback::Hover(target) => {
                    self.highlight(target, "drag-over");
                    self.follow_pointer();
                }
                DragFeedback::Dropped { .. } => {
                    self.scheduler.request(platform::now_ms());
                    self.process_events();
                    self.render();
                }
                DragFeedback::Rejected(_) | DragFeedback::Cancelled => self.render(),
                DragFeedback::Idle | DragFeedback::Ignored => {}
            }
        }

        /// React to what the board published
        fn process_events(&mut self) {
            let events: Vec<GameEvent> = self.events.borrow_mut().drain(..).collect();
            for event in events {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                match &event {
                    GameEvent::SettingsApplied(_) => {
                        self.scheduler.request(platform::now_ms());
                    }
                    GameEvent::CardsOrdered { lane, result } => {
                        log::info!(
                            "Lane {} checked: {:?} (winner: {})",
                            lane,
                            result.values,
                            result.is_winner
                        );
                    }
                    GameEvent::CoinsChanged(change) => {
                        if let Err(err) = self.board.coins().save(self.store.as_mut()) {
                            log::warn!("Could not save coins: {}", err);
                        }
                        update_coin_display(change.coins);
                    }
                }
            }
        }

        fn save(&mut self, reason: SaveReason) {
            let state = self.board.snapshot(platform::now_ms());
            match save_game_state(self.store.as_mut(), &state) {
                Ok(()) => log::debug!("Saved ({:?})", reason),
                Err(err) => log::warn!("Save failed ({:?}): {}", reason, err),
            }
        }

        /// Record where every slot is on screen
        fn measure_layout(&mut self) {
            self.layout.clear();
            let Ok(nodes) = Self::document().query_selector_all(".container.active .slot") else {
                return;
            };
            for i in 0..nodes.length() {
                let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                let index = |name: &str| el.get_attribute(name).and_then(|v| v.parse::<usize>().ok());
                let (Some(lane), Some(slot)) = (index("data-lane"), index("data-slot")) else {
                    continue;
                };
                let rect = el.get_bounding_client_rect();
                self.layout.insert(
                    SlotRef::new(lane, slot),
                    Vec2::new(rect.left() as f32, rect.top() as f32),
                    Vec2::new(rect.right() as f32, rect.bottom() as f32),
                );
            }
        }

        /// Put `class` on the slot at `target` and take it off every other slot
        fn highlight(&self, target: Option<SlotRef>, class: &str) {
            let document = Self::document();
            let Ok(nodes) = document.query_selector_all(".container.active .slot") else {
                return;
            };
            for i in 0..nodes.length() {
                let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                let matches = target.is_some_and(|t| {
                    el.get_attribute("data-lane") == Some(t.lane.to_string())
                        && el.get_attribute("data-slot") == Some(t.slot.to_string())
                });
                let _ = el.class_list().toggle_with_force(class, matches);
            }
        }

        /// Touch drags have no native drag image, so move the card itself
        fn follow_pointer(&self) {
            let Some(session) = self.drag.session() else {
                return;
            };
            if session.source != PointerSource::Touch {
                return;
            }
            let selector = format!(
                ".container.active .slot[data-lane=\"{}\"][data-slot=\"{}\"] .card",
                session.origin.lane, session.origin.slot
            );
            let Ok(Some(card)) = Self::document().query_selector(&selector) else {
                return;
            };
            let Ok(card) = card.dyn_into::<HtmlElement>() else {
                return;
            };
            let offset = session.offset();
            let _ = card
                .style()
                .set_property("transform", &format!("translate({}px, {}px)", offset.x, offset.y));
        }

        /// Rebuild the board markup
        fn render(&self) {
            let document = Self::document();
            let Some(root) = document.get_element_by_id("board") else {
                log::warn!("No #board element");
                return;
            };
            root.set_text_content(None);
            for (index, lane) in self.board.lanes().iter().enumerate() {
                let Ok(lane_el) = element(&document, "div", "lane") else {
                    continue;
                };
                for won in lane.history() {
                    if let Ok(el) = render_container(&document, won, index, false) {
                        let _ = lane_el.append_child(&el);
                    }
                }
                if let Ok(el) = render_container(&document, lane.active(), index, true) {
                    let _ = lane_el.append_child(&el);
                }
                let _ = root.append_child(&lane_el);
            }
        }

        fn toggle_theme(&mut self) {
            self.theme = self.theme.toggle();
            apply_theme(self.theme);
            if let Err(err) = self.theme.save(self.store.as_mut()) {
                log::warn!("Could not save theme: {}", err);
            }
        }

        /// Forget the saved game and coins and deal the current settings again
        fn reset_progress(&mut self) {
            if let Err(err) = clear_game_state(self.store.as_mut()) {
                log::warn!("Could not clear saved game: {}", err);
            }
            self.board.reset_coins();
            let settings = self.board.settings().clone();
            if let Err(err) = self.board.apply_settings(settings) {
                log::error!("Could not deal a new board: {}", err);
            }
            self.process_events();
            self.render();
        }

        fn toggle_mute(&mut self) {
            let muted = !self.audio.is_muted();
            self.audio.set_muted(muted);
            if let Some(btn) = Self::document().get_element_by_id("mute-toggle") {
                btn.set_text_content(Some(if muted { "Unmute" } else { "Mute" }));
            }
        }

        fn show_panel(&self) {
            let document = Self::document();
            if let Some(panel) = document.get_element_by_id("settings-panel") {
                let _ = panel.class_list().toggle_with_force("open", self.panel.is_open());
            }
            if self.panel.is_open() {
                render_settings_form(&document, self.panel.draft());
            }
            set_settings_error(None);
        }

        /// Read the form into the draft and apply it
        fn apply_settings(&mut self) {
            let document = Self::document();
            read_settings_form(&document, self.panel.draft_mut());
            let settings = match self.panel.apply() {
                Ok(settings) => settings,
                Err(err) => {
                    set_settings_error(Some(&err.to_string()));
                    return;
                }
            };
            if let Err(err) = self.board.apply_settings(settings) {
                set_settings_error(Some(&err.to_string()));
                return;
            }
            self.panel.close();
            self.show_panel();
            self.process_events();
            self.render();
        }
    }

    fn element(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
        let el = document.create_element(tag)?;
        el.set_class_name(class);
        Ok(el)
    }

    fn render_container(
        document: &Document,
        container: &Container,
        lane: usize,
        active: bool,
    ) -> Result<Element, JsValue> {
        let class = if active { "container active" } else { "container won" };
        let root = element(document, "div", class)?;
        for (attr, value) in container.config().attributes() {
            root.set_attribute(attr, &value)?;
        }

        let row = element(document, "div", "slots")?;
        for slot in container.slots() {
            let slot_el = element(document, "div", "slot")?;
            slot_el.set_attribute("data-lane", &lane.to_string())?;
            slot_el.set_attribute("data-slot", &slot.index.to_string())?;
            if let Some(card) = slot.occupant {
                let card_el = element(document, "div", "card")?;
                card_el.set_attribute("draggable", if active { "true" } else { "false" })?;
                card_el.set_text_content(Some(&card.value().to_string()));
                slot_el.append_child(&card_el)?;
            }
            row.append_child(&slot_el)?;
        }
        root.append_child(&row)?;

        let config = container.config();
        let stats = element(document, "div", "stats")?;
        let mut text = format!(
            "Total: {} cards | Range: {}-{} | {}",
            container.len(),
            config.min_range,
            config.max_range,
            config.mode.label()
        );
        if let Some(s) = container.stats() {
            text.push_str(&format!(" | Min: {} | Max: {}", s.min, s.max));
        }
        stats.set_text_content(Some(&text));
        root.append_child(&stats)?;
        Ok(root)
    }

    fn render_settings_form(document: &Document, draft: &Settings) {
        if let Some(count) = document
            .get_element_by_id("container-count")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            count.set_value(&draft.number_of_containers.to_string());
        }
        let Some(fields) = document.get_element_by_id("settings-fields") else {
            return;
        };
        fields.set_text_content(None);
        for (i, container) in draft.active().iter().enumerate() {
            if let Ok(el) = container_fields(document, i, container) {
                let _ = fields.append_child(&el);
            }
        }
    }

    fn container_fields(
        document: &Document,
        i: usize,
        container: &ContainerSettings,
    ) -> Result<Element, JsValue> {
        let group = element(document, "fieldset", "container-settings")?;
        let legend = document.create_element("legend")?;
        legend.set_text_content(Some(&format!("Container {}", i + 1)));
        group.append_child(&legend)?;

        for (id, label, value) in [
            ("cards", "Cards", container.cards as u32),
            ("min", "Min", container.min_range),
            ("max", "Max", container.max_range),
        ] {
            let label_el = document.create_element("label")?;
            label_el.set_text_content(Some(label));
            let input = document.create_element("input")?;
            input.set_id(&format!("{}-{}", id, i));
            input.set_attribute("type", "number")?;
            input.set_attribute("min", if id == "cards" { "1" } else { "0" })?;
            if id == "cards" {
                input.set_attribute("max", "8")?;
            }
            input.set_attribute("value", &value.to_string())?;
            label_el.append_child(&input)?;
            group.append_child(&label_el)?;
        }

        let select = document.create_element("select")?;
        select.set_id(&format!("mode-{}", i));
        for mode in [WinningMode::Ascending, WinningMode::Descending] {
            let option = document.create_element("option")?;
            option.set_attribute("value", mode.as_str())?;
            option.set_text_content(Some(mode.label()));
            if mode == container.winning_mode {
                option.set_attribute("selected", "")?;
            }
            select.append_child(&option)?;
        }
        group.append_child(&select)?;
        Ok(group)
    }

    /// Copy form values into `draft`; unparseable numbers leave the field as is
    fn read_settings_form(document: &Document, draft: &mut Settings) {
        let input = |id: &str| {
            document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|el| el.value())
        };
        if let Some(count) = input("container-count").and_then(|v| v.parse::<usize>().ok()) {
            draft.resize(count);
        }
        let count = draft.number_of_containers;
        for (i, container) in draft.containers.iter_mut().take(count).enumerate() {
            if let Some(v) = input(&format!("cards-{}", i)).and_then(|v| v.parse().ok()) {
                container.cards = v;
            }
            if let Some(v) = input(&format!("min-{}", i)).and_then(|v| v.parse().ok()) {
                container.min_range = v;
            }
            if let Some(v) = input(&format!("max-{}", i)).and_then(|v| v.parse().ok()) {
                container.max_range = v;
            }
            if let Some(mode) = document
                .get_element_by_id(&format!("mode-{}", i))
                .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
                .and_then(|el| WinningMode::from_str(&el.value()))
            {
                container.winning_mode = mode;
            }
        }
    }

    fn set_settings_error(message: Option<&str>) {
        if let Some(el) = App::document().get_element_by_id("settings-error") {
            el.set_text_content(message);
        }
    }

    fn update_coin_display(coins: u64) {
        if let Some(el) = App::document().get_element_by_id("coin-count") {
            el.set_text_content(Some(&coins.to_string()));
        }
    }

    fn apply_theme(theme: Theme) {
        if let Some(root) = App::document().document_element() {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Card Order starting...");

        let mut store: Box<dyn KeyValueStore> = match platform::open_store() {
            Ok(store) => store,
            Err(err) => {
                log::warn!("Persistent storage unavailable ({}), progress won't be kept", err);
                Box::new(MemoryStore::new())
            }
        };

        let theme = Theme::load(store.as_ref());
        apply_theme(theme);

        let saved = load_game_state(store.as_ref());
        let seed = platform::clock_seed();
        let board = Board::from_saved(saved.as_ref(), seed)
            .or_else(|err| {
                log::warn!("Could not rebuild saved game ({}), dealing defaults", err);
                Board::new(Settings::default(), seed)
            });
        let mut board = match board {
            Ok(board) => board,
            Err(err) => {
                log::error!("Could not deal a board: {}", err);
                return;
            }
        };
        board.set_coin_bag(card_order::CoinBag::load(store.as_ref()));
        update_coin_display(board.coins().coins());

        let events = Rc::new(RefCell::new(Vec::new()));
        {
            let events = events.clone();
            board.subscribe(move |event| events.borrow_mut().push(event.clone()));
        }

        let panel = SettingsPanel::new(board.settings().clone()).unwrap_or_default();
        let now = platform::now_ms();
        let mut scheduler = SaveScheduler::new(now);
        if saved.is_none() {
            // First run: write the defaults straight away
            let state = board.snapshot(now);
            if let Err(err) = save_game_state(store.as_mut(), &state) {
                log::warn!("Initial save failed: {}", err);
            }
            scheduler.flush(now);
        }

        let app = Rc::new(RefCell::new(App {
            board,
            events,
            drag: DragController::new(),
            layout: SlotLayout::new(),
            panel,
            scheduler,
            store,
            theme,
            audio: AudioManager::new(),
        }));
        app.borrow().render();

        setup_drag_handlers(app.clone());
        setup_touch_handlers(app.clone());
        setup_controls(app.clone());
        setup_save_timers(app);

        log::info!("Card Order running!");
    }

    fn client_point(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.client_x() as f32, event.client_y() as f32)
    }

    fn listen<E, F>(target: &web_sys::EventTarget, name: &str, handler: F)
    where
        E: wasm_bindgen::convert::FromWasmAbi + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_drag_handlers(app: Rc<RefCell<App>>) {
        let Some(board) = App::document().get_element_by_id("board") else {
            return;
        };

        {
            let app = app.clone();
            listen(&board, "dragstart", move |event: DragEvent| {
                if let Some(dt) = event.data_transfer() {
                    dt.set_effect_allowed("move");
                    // Firefox won't start a drag without data
                    let _ = dt.set_data("text/plain", "card");
                }
                let input = PointerInput::new(PointerPhase::Start, PointerSource::Mouse, client_point(&event));
                app.borrow_mut().handle_pointer(input);
            });
        }
        {
            let app = app.clone();
            listen(&board, "dragover", move |event: DragEvent| {
                event.prevent_default();
                let input = PointerInput::new(PointerPhase::Move, PointerSource::Mouse, client_point(&event));
                app.borrow_mut().handle_pointer(input);
            });
        }
        {
            let app = app.clone();
            listen(&board, "drop", move |event: DragEvent| {
                event.prevent_default();
                let input = PointerInput::new(PointerPhase::End, PointerSource::Mouse, client_point(&event));
                app.borrow_mut().handle_pointer(input);
            });
        }
        // Fires after drop too; by then the session is gone and this is a no-op
        listen(&board, "dragend", move |event: DragEvent| {
            let input = PointerInput::new(PointerPhase::Cancel, PointerSource::Mouse, client_point(&event));
            app.borrow_mut().handle_pointer(input);
        });
    }

    fn setup_touch_handlers(app: Rc<RefCell<App>>) {
        let Some(board) = App::document().get_element_by_id("board") else {
            return;
        };

        fn touch_point(event: &TouchEvent) -> Option<Vec2> {
            let touch = event.changed_touches().get(0)?;
            Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
        }

        let phases = [
            ("touchstart", PointerPhase::Start),
            ("touchmove", PointerPhase::Move),
            ("touchend", PointerPhase::End),
            ("touchcancel", PointerPhase::Cancel),
        ];
        for (name, phase) in phases {
            let app = app.clone();
            listen(&board, name, move |event: TouchEvent| {
                let Some(point) = touch_point(&event) else {
                    return;
                };
                let mut app = app.borrow_mut();
                // Stop the page scrolling while a card is held
                if app.drag.is_dragging() && phase == PointerPhase::Move {
                    event.prevent_default();
                }
                app.handle_pointer(PointerInput::new(phase, PointerSource::Touch, point));
            });
        }
    }

    fn setup_controls(app: Rc<RefCell<App>>) {
        let document = App::document();

        if let Some(btn) = document.get_element_by_id("theme-toggle") {
            let app = app.clone();
            listen(&btn, "click", move |_event: MouseEvent| {
                app.borrow_mut().toggle_theme();
            });
        }

        if let Some(btn) = document.get_element_by_id("reset-progress") {
            let app = app.clone();
            listen(&btn, "click", move |_event: MouseEvent| {
                app.borrow_mut().reset_progress();
            });
        }

        if let Some(btn) = document.get_element_by_id("mute-toggle") {
            let app = app.clone();
            listen(&btn, "click", move |_event: MouseEvent| {
                app.borrow_mut().toggle_mute();
            });
        }

        if let Some(volume) = document
            .get_element_by_id("volume")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let app = app.clone();
            let input = volume.clone();
            listen(&volume, "input", move |_event: web_sys::Event| {
                // Slider runs 0..=100
                if let Ok(percent) = input.value().parse::<f32>() {
                    app.borrow_mut().audio.set_volume(percent / 100.0);
                }
            });
        }

        if let Some(btn) = document.get_element_by_id("settings-btn") {
            let app = app.clone();
            listen(&btn, "click", move |_event: MouseEvent| {
                let mut app = app.borrow_mut();
                app.panel.discard_draft();
                app.panel.toggle();
                app.show_panel();
            });
        }

        for id in ["close-settings", "settings-overlay"] {
            if let Some(el) = document.get_element_by_id(id) {
                let app = app.clone();
                listen(&el, "click", move |_event: MouseEvent| {
                    let mut app = app.borrow_mut();
                    app.panel.close();
                    app.show_panel();
                });
            }
        }

        if let Some(count) = document.get_element_by_id("container-count") {
            let app = app.clone();
            listen(&count, "change", move |_event: web_sys::Event| {
                let mut app = app.borrow_mut();
                let document = App::document();
                read_settings_form(&document, app.panel.draft_mut());
                render_settings_form(&document, app.panel.draft());
            });
        }

        if let Some(btn) = document.get_element_by_id("apply-settings") {
            let app = app.clone();
            listen(&btn, "click", move |_event: MouseEvent| {
                app.borrow_mut().apply_settings();
            });
        }

        if let Some(window) = web_sys::window() {
            listen(&window, "keydown", move |event: KeyboardEvent| {
                let mut app = app.borrow_mut();
                if app.panel.handle_key(&event.key()) {
                    app.show_panel();
                }
            });
        }
    }

    fn setup_save_timers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Debounced and periodic saves
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let mut app = app.borrow_mut();
                if let Some(reason) = app.scheduler.poll(platform::now_ms()) {
                    app.save(reason);
                }
            });
            let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                POLL_INTERVAL_MS,
            );
            closure.forget();
        }

        // Best effort: the browser may tear the page down before this lands
        {
            let app = app.clone();
            let document = App::document();
            let document_clone = document.clone();
            listen(&document, "visibilitychange", move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut app = app.borrow_mut();
                    let reason = app.scheduler.flush(platform::now_ms());
                    app.save(reason);
                }
            });
        }
        listen(&window, "pagehide", move |_event: web_sys::Event| {
            let mut app = app.borrow_mut();
            let reason = app.scheduler.flush(platform::now_ms());
            app.save(reason);
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Card Order (native) starting...");
    log::info!("The playable version runs in the browser - build with `trunk serve`");

    if let Err(err) = demo_round() {
        log::error!("Demo failed: {}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Sort one dealt container by dragging cards, then save and reload
#[cfg(not(target_arch = "wasm32"))]
fn demo_round() -> Result<(), Box<dyn std::error::Error>> {
    use card_order::game::{Board, GameEvent};
    use card_order::persistence::{MemoryStore, load_game_state, save_game_state};
    use card_order::{Settings, WinningMode, platform};

    let seed = platform::clock_seed();
    let mut board = Board::new(Settings::default(), seed)?;
    board.subscribe(|event| match event {
        GameEvent::CardsOrdered { result, .. } => {
            println!("  checked {:?} -> winner: {}", result.values, result.is_winner)
        }
        GameEvent::CoinsChanged(change) => println!("  coins: {}", change.coins),
        GameEvent::SettingsApplied(_) => {}
    });

    let start = board.lanes()[0].active().current_order();
    println!("Dealt: {:?}", start);

    let mode = board.lanes()[0].active().mode();
    let mut target = start.clone();
    target.sort();
    if mode == WinningMode::Descending {
        target.reverse();
    }
    for i in 0..target.len() {
        let values = board.lanes()[0].active().current_order();
        if values[i] == target[i] {
            continue;
        }
        let Some(j) = (i..values.len()).find(|&j| values[j] == target[i]) else {
            break;
        };
        let outcome = board.move_card(0, j, i)?;
        if outcome.check.is_win() {
            break;
        }
    }

    let mut store = MemoryStore::new();
    save_game_state(&mut store, &board.snapshot(platform::now_ms()))?;
    let reloaded = load_game_state(&store).ok_or("saved game did not load back")?;
    let restored = Board::restore(&reloaded, seed)?;
    println!(
        "Rounds won: {} | next round: {:?}",
        restored.lanes()[0].rounds_won(),
        restored.lanes()[0].active().current_order()
    );
    Ok(())
}
