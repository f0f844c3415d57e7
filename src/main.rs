//! GreenEarth site entry point
//!
//! Binds the page's DOM events to the component controllers.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_site {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement,
        HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
        IntersectionObserverInit, KeyboardEvent, MouseEvent,
    };

    use greenearth_site::config::{NavSettings, WeatherSettings};
    use greenearth_site::contact::{self, ContactForm, Field};
    use greenearth_site::nav::{self, Focus, MenuChange, NavMenu, SectionTracker};
    use greenearth_site::platform::{self, LocalStore, geolocation};
    use greenearth_site::{GoalList, SiteConfig, WeatherWidget};

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("GreenEarth site starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document, nothing to enhance");
            return;
        };

        let config = SiteConfig::load();

        setup_nav(&document, &config.nav);
        setup_weather(&document, config.weather);
        setup_goals(&document);
        setup_contact(&document);

        log::info!("GreenEarth site ready");
    }

    /// All elements matching `selector`, in document order
    fn query_all(document: &Document, selector: &str) -> Vec<Element> {
        let Ok(list) = document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn focus(el: &Element) {
        if let Some(el) = el.dyn_ref::<HtmlElement>() {
            let _ = el.focus();
        }
    }

    fn apply_menu_change(menu: &Element, toggle: &Element, change: MenuChange) {
        let _ = menu.class_list().toggle_with_force("open", change.open);
        let _ = toggle.set_attribute("aria-expanded", change.aria_expanded());
        match change.focus {
            Focus::FirstLink => {
                if let Some(first) = menu.query_selector("a").ok().flatten() {
                    focus(&first);
                }
            }
            Focus::Toggle => focus(toggle),
        }
    }

    fn setup_nav(document: &Document, settings: &NavSettings) {
        let links = query_all(document, ".nav-link");
        let menu_state = Rc::new(RefCell::new(NavMenu::new()));

        let menu = document.get_element_by_id("primary-nav");
        let toggle = document.get_element_by_id("navToggle");

        if let (Some(menu), Some(toggle)) = (menu, toggle) {
            // Burger toggle
            {
                let menu_state = menu_state.clone();
                let (menu, toggle_el) = (menu.clone(), toggle.clone());
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let change = menu_state.borrow_mut().toggle();
                    apply_menu_change(&menu, &toggle_el, change);
                });
                let _ = toggle
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            // Following a link closes the mobile menu
            for link in &links {
                let menu_state = menu_state.clone();
                let (menu, toggle) = (menu.clone(), toggle.clone());
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let change = menu_state.borrow_mut().link_activated();
                    if let Some(change) = change {
                        apply_menu_change(&menu, &toggle, change);
                    }
                });
                let _ = link
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Enter/Space on a focused link acts as a click
        for link in &links {
            let link_clone = link.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if nav::is_activation_key(&event.key()) {
                    event.prevent_default();
                    if let Some(el) = link_clone.dyn_ref::<HtmlElement>() {
                        el.click();
                    }
                }
            });
            let _ = link.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        setup_section_highlight(document, settings, links);
    }

    fn setup_section_highlight(document: &Document, settings: &NavSettings, links: Vec<Element>) {
        let sections = query_all(document, "main section[id]");
        if sections.is_empty() || links.is_empty() {
            return;
        }

        let linked = links
            .iter()
            .filter_map(|l| l.get_attribute("href"))
            .filter_map(|href| href.strip_prefix('#').map(str::to_string));
        let tracker = Rc::new(RefCell::new(SectionTracker::new(linked)));

        let closure = Closure::<dyn FnMut(js_sys::Array, JsValue)>::new(
            move |entries: js_sys::Array, _observer: JsValue| {
                let batch: Vec<(String, bool)> = entries
                    .iter()
                    .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|e| (e.target().id(), e.is_intersecting()))
                    .collect();

                let mut tracker = tracker.borrow_mut();
                tracker.observe(batch.iter().map(|(id, hit)| (id.as_str(), *hit)));
                for link in &links {
                    let href = link.get_attribute("href").unwrap_or_default();
                    let _ = link
                        .class_list()
                        .toggle_with_force("active", tracker.is_active_href(&href));
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&settings.root_margin);
        init.set_threshold(&JsValue::from_f64(0.0));

        match IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                for section in &sections {
                    observer.observe(section);
                }
                log::info!("Observing {} sections", sections.len());
            }
            Err(e) => log::warn!("Section highlighting unavailable: {:?}", e),
        }
        closure.forget();
    }

    fn setup_weather(document: &Document, settings: WeatherSettings) {
        let Some(container) = document.get_element_by_id("weather") else {
            return;
        };

        let mut widget = WeatherWidget::new(settings);
        container.set_inner_html(&widget.render());

        wasm_bindgen_futures::spawn_local(async move {
            widget.run(geolocation::current_position).await;
            container.set_inner_html(&widget.render());
        });
    }

    fn setup_goals(document: &Document) {
        let form = document.get_element_by_id("todoForm");
        let input = document
            .get_element_by_id("todoInput")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        let list_el = document.get_element_by_id("todoList");
        let error_el = document.get_element_by_id("todoError");

        let (Some(form), Some(input), Some(list_el), Some(error_el)) =
            (form, input, list_el, error_el)
        else {
            log::warn!("Goal list markup missing, skipping");
            return;
        };

        let goals = Rc::new(RefCell::new(GoalList::load(LocalStore)));
        list_el.set_inner_html(&goals.borrow().render());

        // Add
        {
            let goals = goals.clone();
            let list_el = list_el.clone();
            let error_el = error_el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                event.prevent_default();
                error_el.set_text_content(Some(""));

                let mut g = goals.borrow_mut();
                let added = g.add(&input.value()).map(|_| ());
                match added {
                    Ok(_) => {
                        input.set_value("");
                        list_el.set_inner_html(&g.render());
                        let _ = input.focus();
                    }
                    Err(e) => error_el.set_text_content(Some(&e.to_string())),
                }
            });
            let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Remove, delegated from the list so rows can be re-rendered freely
        {
            let goals = goals.clone();
            let list_clone = list_el.clone();
            let error_el = error_el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let index = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest("button[data-index]").ok().flatten())
                    .and_then(|btn| btn.get_attribute("data-index"))
                    .and_then(|v| v.parse::<usize>().ok());
                let Some(index) = index else {
                    return;
                };

                error_el.set_text_content(Some(""));
                let mut g = goals.borrow_mut();
                if let Err(e) = g.remove(index) {
                    log::warn!("Remove failed: {e}");
                    error_el.set_text_content(Some(&e.to_string()));
                }
                list_clone.set_inner_html(&g.render());
            });
            let _ = list_el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Clear all
        if let Some(btn) = document.get_element_by_id("clearTodos") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = goals.borrow_mut();
                match g.clear(platform::confirm) {
                    Ok(true) => {
                        error_el.set_text_content(Some(""));
                        list_el.set_inner_html(&g.render());
                    }
                    Ok(false) => {}
                    Err(e) => {
                        log::warn!("Clear failed: {e}");
                        error_el.set_text_content(Some(&e.to_string()));
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Value of a text input or textarea by id
    fn field_value(document: &Document, id: &str) -> String {
        let Some(el) = document.get_element_by_id(id) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn setup_contact(document: &Document) {
        let Some(form) = document
            .get_element_by_id("contactForm")
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        else {
            return;
        };

        let document = document.clone();
        let form_clone = form.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
            event.prevent_default();

            let input = ContactForm {
                name: field_value(&document, Field::Name.input_id()),
                email: field_value(&document, Field::Email.input_id()),
                message: field_value(&document, Field::Message.input_id()),
            };
            let errors = input.validate();

            for field in Field::ALL {
                if let Some(el) = document.get_element_by_id(field.error_id()) {
                    el.set_text_content(Some(errors.get(field).unwrap_or("")));
                }
            }

            let status = document.get_element_by_id("formStatus");
            if let Some(field) = errors.first_invalid() {
                if let Some(status) = &status {
                    status.set_text_content(Some(""));
                }
                if let Some(el) = document.get_element_by_id(field.input_id()) {
                    focus(&el);
                }
                return;
            }

            if let Some(status) = &status {
                status.set_text_content(Some(contact::SUCCESS_STATUS));
            }
            form_clone.reset();
            log::info!("Contact form accepted");
        });
        let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_site::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("GreenEarth site (native) starting...");
    log::info!("The site runs in the browser - build with `trunk serve` for the web version");

    let config = greenearth_site::SiteConfig::load();
    if config.weather.api_key().is_some() {
        log::info!("Weather API key configured");
    } else {
        log::warn!("No weather API key; the widget will show a configuration message");
    }
    log::info!("Weather fallback city: {}", config.weather.fallback_city);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
