use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};
use wordmatch::{Language, TileId, TileRenderer, TileState, TileView};

/// Element ids the page provides.
#[derive(Debug, Clone)]
pub struct DomLayout {
    pub source_column: String,
    pub target_column: String,
    pub timer_bar: String,
    /// Shown in an alert when the countdown runs out.
    pub end_message: String,
}

impl Default for DomLayout {
    fn default() -> Self {
        Self {
            source_column: "english-words".to_string(),
            target_column: "french-words".to_string(),
            timer_bar: "timer-bar".to_string(),
            end_message: "Time's up! The game is over.".to_string(),
        }
    }
}

/// A tile on the page. The listener lives exactly as long as the element.
struct DomTile {
    element: Element,
    language: Language,
    _listener: Closure<dyn FnMut()>,
}

/// Renders tiles as `div.grid-item` elements and the countdown as the width
/// of a bar element. Clicks are forwarded to `on_click`.
pub struct DomRenderer {
    window: Window,
    document: Document,
    layout: DomLayout,
    tiles: HashMap<TileId, DomTile>,
    on_click: Rc<dyn Fn(TileId)>,
}

impl DomRenderer {
    pub fn new(layout: DomLayout, on_click: impl Fn(TileId) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        Ok(Self {
            window,
            document,
            layout,
            tiles: HashMap::new(),
            on_click: Rc::new(on_click),
        })
    }

    fn element(&self, id: &str) -> Result<Element, JsValue> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
    }

    fn column(&self, language: Language) -> Result<Element, JsValue> {
        match language {
            Language::Source => self.element(&self.layout.source_column),
            Language::Target => self.element(&self.layout.target_column),
        }
    }

    fn try_render_tile(&mut self, tile: &TileView) -> Result<(), JsValue> {
        let column = self.column(tile.language)?;
        let element = self.document.create_element("div")?;
        element.class_list().add_1("grid-item")?;
        element.set_text_content(Some(&tile.text));
        element.set_attribute("data-language", tile.language.as_str())?;
        element.set_attribute("data-tile", &tile.id.0.to_string())?;

        let on_click = Rc::clone(&self.on_click);
        let id = tile.id;
        let listener = Closure::<dyn FnMut()>::new(move || on_click(id));
        element.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
        column.append_child(&element)?;

        self.tiles.insert(id, DomTile {
            element,
            language: tile.language,
            _listener: listener,
        });
        Ok(())
    }

    fn try_clear_tiles(&mut self, language: Language) -> Result<(), JsValue> {
        self.tiles.retain(|_, tile| {
            if tile.language == language {
                tile.element.remove();
                false
            } else {
                true
            }
        });
        // Also drop anything a previous runner left behind.
        self.column(language)?.set_inner_html("");
        Ok(())
    }

    fn try_set_state(&self, id: TileId, state: TileState) -> Result<(), JsValue> {
        let Some(tile) = self.tiles.get(&id) else {
            log::warn!("dom: no element for tile {:?}", id);
            return Ok(());
        };
        let classes = tile.element.class_list();
        classes.remove_2("selected", "matched")?;
        match state {
            TileState::Idle => {}
            TileState::Selected => classes.add_1("selected")?,
            TileState::Matched => classes.add_1("matched")?,
        }
        Ok(())
    }

    fn try_set_progress(&self, fraction: f32) -> Result<(), JsValue> {
        let bar: HtmlElement = self.element(&self.layout.timer_bar)?.dyn_into()?;
        let percent = (fraction.clamp(0.0, 1.0) * 100.0) as f64;
        bar.style().set_property("width", &format!("{percent}%"))
    }
}

impl TileRenderer for DomRenderer {
    fn render_tile(&mut self, tile: &TileView) {
        if let Err(err) = self.try_render_tile(tile) {
            log::warn!("dom: failed to render tile {:?}: {:?}", tile.id, err);
        }
    }

    fn clear_tiles(&mut self, column: Language) {
        if let Err(err) = self.try_clear_tiles(column) {
            log::warn!("dom: failed to clear {} column: {:?}", column.as_str(), err);
        }
    }

    fn set_tile_visual_state(&mut self, tile: TileId, state: TileState) {
        if let Err(err) = self.try_set_state(tile, state) {
            log::warn!("dom: failed to style tile {:?}: {:?}", tile, err);
        }
    }

    fn set_progress_bar(&mut self, fraction: f32) {
        if let Err(err) = self.try_set_progress(fraction) {
            log::warn!("dom: failed to update timer bar: {:?}", err);
        }
    }

    fn notify_end_of_session(&mut self) {
        if let Err(err) = self.window.alert_with_message(&self.layout.end_message) {
            log::warn!("dom: failed to show end-of-session alert: {:?}", err);
        }
    }
}
