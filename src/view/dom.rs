//! DOM rendering for the browser build
//!
//! The host page provides the static skeleton; this module positions the
//! dynamic pieces inside it. Missing elements are skipped.
//!
//! Expected ids: `world`, `title-screen`, `hud`, `hud-xp`, `hud-xp-bar`,
//! `hud-section`, `radar` (16 children), `section-panel`, `section-<id>`,
//! `mute-btn`, `fullscreen-btn`, `controls-hint`.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::{NodeState, WorldView};
use crate::shell::{ActiveView, Shell, radar_sector};
use crate::sim::{SectionId, World};

/// Handles to the elements updated every frame
pub struct DomView {
    document: Document,
    car: Option<HtmlElement>,
    trails: Option<Element>,
    bursts: Option<Element>,
    nodes: Vec<(SectionId, Element)>,
    pickups: Vec<Element>,
    hint: Option<Element>,
}

impl DomView {
    /// Create the overworld elements under `#world`
    pub fn mount(document: &Document, world: &World) -> Option<Self> {
        let root = document.get_element_by_id("world")?;
        root.set_inner_html("");

        let trails = div(document, &root, "trails");
        let pickups = world
            .collectibles
            .iter()
            .filter_map(|c| {
                let el = div(document, &root, "pickup")?;
                place(&el, c.pos.x, c.pos.y, None);
                Some(el)
            })
            .collect();
        let bursts = div(document, &root, "bursts");

        let nodes = world
            .nodes
            .iter()
            .filter_map(|node| {
                let el = div(document, &root, NodeState::Idle.css_class())?;
                let _ = el.set_attribute("data-section", node.id.as_str());
                let _ = el.set_attribute("data-icon", &node.icon);
                place(&el, node.pos.x, node.pos.y, None);
                if let Some(label) = div(document, &el, "node-label") {
                    label.set_text_content(Some(&node.label));
                }
                Some((node.id, el))
            })
            .collect();

        let car = div(document, &root, "car").and_then(|el| el.dyn_into::<HtmlElement>().ok());

        log::debug!("Overworld mounted");
        Some(Self {
            document: document.clone(),
            car,
            trails,
            bursts,
            nodes,
            pickups,
            hint: document.get_element_by_id("controls-hint"),
        })
    }

    /// Redraw the overworld from the published view state
    pub fn render(&self, world: &World, view: &WorldView) {
        let snapshot = view.snapshot();
        if let Some(car) = &self.car {
            let style = car.style();
            let _ = style.set_property("left", &format!("{}%", snapshot.pos.x));
            let _ = style.set_property("top", &format!("{}%", snapshot.pos.y));
            let _ = style.set_property(
                "transform",
                &format!("translate3d(-50%, -50%, 0) rotate({}deg)", snapshot.rotation),
            );
            let _ = car
                .class_list()
                .toggle_with_force("accelerating", snapshot.accelerating);
        }

        if let Some(container) = &self.trails {
            container.set_inner_html("");
            for segment in view.trail() {
                if let Some(el) = div(&self.document, container, "trail") {
                    let extra = format!("opacity:{};", segment.opacity);
                    place_with(&el, segment.pos.x, segment.pos.y, Some(segment.rotation), &extra);
                }
            }
        }

        if let Some(container) = &self.bursts {
            container.set_inner_html("");
            for burst in view.bursts() {
                if let Some(el) = div(&self.document, container, "burst") {
                    place(&el, burst.pos.x, burst.pos.y, None);
                }
            }
        }

        for (el, pickup) in self.pickups.iter().zip(&world.collectibles) {
            let _ = el.class_list().toggle_with_force("hidden", pickup.is_collected());
        }

        for ((_, el), node) in self.nodes.iter().zip(&world.nodes) {
            let _ = el.set_attribute("class", view.node_state(node).css_class());
        }

        if let Some(hint) = &self.hint {
            let _ = hint.class_list().toggle_with_force("hidden", !view.hint_visible());
        }
    }

    /// Redraw the HUD and shell chrome
    pub fn render_shell(&self, shell: &Shell, view: &WorldView) {
        let state = shell.state();
        let doc = &self.document;

        show(doc, "title-screen", !state.started);
        show(doc, "hud", state.started);

        if let Some(el) = doc.query_selector("#hud-xp .hud-value").ok().flatten() {
            el.set_text_content(Some(&state.xp.to_string()));
        }
        if let Some(el) = doc
            .get_element_by_id("hud-xp-bar")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el
                .style()
                .set_property("width", &format!("{}%", shell.xp_percentage()));
        }

        let section_label = match state.active {
            ActiveView::Hub => "hub",
            ActiveView::Section(id) => id.as_str(),
        };
        if let Some(el) = doc.query_selector("#hud-section .hud-value").ok().flatten() {
            el.set_text_content(Some(section_label));
        }

        if let Some(radar) = doc.get_element_by_id("radar") {
            let active = radar_sector(view.snapshot().pos);
            let cells = radar.children();
            for i in 0..cells.length() {
                if let Some(cell) = cells.item(i) {
                    let class = if i as usize == active {
                        "radar-cell active"
                    } else {
                        "radar-cell"
                    };
                    let _ = cell.set_attribute("class", class);
                }
            }
        }

        show(doc, "world", state.active == ActiveView::Hub);
        show(doc, "section-panel", state.active != ActiveView::Hub);
        for id in SectionId::ALL {
            show(
                doc,
                &format!("section-{}", id.as_str()),
                state.active == ActiveView::Section(id),
            );
        }

        if let Some(el) = doc.get_element_by_id("mute-btn") {
            el.set_text_content(Some(if state.muted { "Muted" } else { "Audio On" }));
        }
        if let Some(el) = doc.get_element_by_id("fullscreen-btn") {
            el.set_text_content(Some(if state.fullscreen { "Exit" } else { "Fullscreen" }));
        }
    }
}

fn div(document: &Document, parent: &Element, class: &str) -> Option<Element> {
    let el = document.create_element("div").ok()?;
    let _ = el.set_attribute("class", class);
    parent.append_child(&el).ok()?;
    Some(el)
}

/// Center `el` on a world position (percent coordinates)
fn place(el: &Element, x: f32, y: f32, rotation: Option<f32>) {
    place_with(el, x, y, rotation, "");
}

fn place_with(el: &Element, x: f32, y: f32, rotation: Option<f32>, extra: &str) {
    let rotate = rotation
        .map(|r| format!(" rotate({r}deg)"))
        .unwrap_or_default();
    let _ = el.set_attribute(
        "style",
        &format!("left:{x}%;top:{y}%;transform:translate(-50%, -50%){rotate};{extra}"),
    );
}

fn show(document: &Document, id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.class_list().toggle_with_force("hidden", !visible);
    }
}
