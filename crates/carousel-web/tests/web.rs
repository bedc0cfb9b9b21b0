//! Browser tests for the `CarouselJS` export

use carousel_web::CarouselJs;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Append an empty container with `id` to the body
fn container(id: &str) -> HtmlElement {
    let document = document();
    let element = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    element.set_id(id);
    element.style().set_property("width", "900px").unwrap();
    document.body().unwrap().append_child(&element).unwrap();
    element
}

fn items_json(count: usize) -> String {
    let items: Vec<String> = (0..count)
        .map(|i| format!(r#"{{"id":{i},"title":"Book {i}","description":"About book {i}"}}"#))
        .collect();
    format!("[{}]", items.join(","))
}

/// Options object for `#id` with `count` items and rotation off
fn options(id: &str, count: usize) -> JsValue {
    let json = format!(
        r##"{{"selector":"#{id}","items":{},"autoRotate":false,"adaptToMobile":false}}"##,
        items_json(count)
    );
    js_sys::JSON::parse(&json).unwrap()
}

fn count(root: &HtmlElement, selector: &str) -> u32 {
    root.query_selector_all(selector).unwrap().length()
}

#[wasm_bindgen_test]
fn test_mount_builds_track_and_pagination() {
    let root = container("mount-test");
    let _carousel = CarouselJs::new(options("mount-test", 10)).unwrap();

    assert!(root.class_list().contains("slider"));
    assert_eq!(root.get_attribute("role").as_deref(), Some("region"));
    assert!(!root.class_list().contains("loading"));
    assert_eq!(count(&root, ".slide-track > *"), 21);
    assert_eq!(count(&root, ".pagination .dot"), 7);
    assert_eq!(count(&root, ".dot.active-dot"), 3);
    assert_eq!(count(&root, ".nav-btn"), 2);
}

#[wasm_bindgen_test]
fn test_next_moves_current_slide() {
    container("next-test");
    let carousel = CarouselJs::new(options("next-test", 7)).unwrap();
    assert_eq!(carousel.current_slide(), 0);

    assert!(carousel.next());
    assert_eq!(carousel.current_slide(), 1);

    // Second step inside the throttle window
    assert!(!carousel.next());
    assert_eq!(carousel.current_slide(), 1);
}

#[wasm_bindgen_test]
fn test_go_to_slide() {
    container("goto-test");
    let carousel = CarouselJs::new(options("goto-test", 7)).unwrap();

    assert!(!carousel.go_to_slide(0.0));
    assert!(!carousel.go_to_slide(7.0));
    assert!(!carousel.go_to_slide(-1.0));
    assert!(carousel.go_to_slide(4.0));
    assert_eq!(carousel.current_slide(), 4);
}

#[wasm_bindgen_test]
fn test_slide_change_callback() {
    container("callback-test");
    let opts = options("callback-test", 7);
    let callback = js_sys::Function::new_with_args("index", "globalThis.__carouselSlide = index;");
    js_sys::Reflect::set(&opts, &"onSlideChange".into(), &callback).unwrap();

    let carousel = CarouselJs::new(opts).unwrap();
    assert!(carousel.prev());

    let reported = js_sys::Reflect::get(&js_sys::global(), &"__carouselSlide".into()).unwrap();
    assert_eq!(reported.as_f64(), Some(6.0));
}

#[wasm_bindgen_test]
fn test_custom_render_item() {
    let root = container("render-test");
    let opts = options("render-test", 5);
    let render = js_sys::Function::new_with_args(
        "item, index",
        "return '<div class=\"custom\" data-index=\"' + index + '\">' + item.title + '</div>';",
    );
    js_sys::Reflect::set(&opts, &"renderItem".into(), &render).unwrap();

    let _carousel = CarouselJs::new(opts).unwrap();
    assert_eq!(count(&root, ".custom"), 15);
    assert_eq!(count(&root, ".custom[data-index=\"4\"]"), 3);
}

#[wasm_bindgen_test]
fn test_update_replaces_items() {
    let root = container("update-test");
    let carousel = CarouselJs::new(options("update-test", 7)).unwrap();

    let patch = js_sys::JSON::parse(&format!(r#"{{"items":{}}}"#, items_json(4))).unwrap();
    carousel.update(patch).unwrap();

    assert_eq!(count(&root, ".slide-track > *"), 12);
    assert_eq!(count(&root, ".pagination .dot"), 4);
    assert_eq!(carousel.current_slide(), 0);
}

#[wasm_bindgen_test]
fn test_missing_container_fails() {
    assert!(CarouselJs::new(options("no-such-element", 7)).is_err());
}

#[wasm_bindgen_test]
fn test_missing_items_fails() {
    container("empty-test");
    let opts = js_sys::JSON::parse(r##"{"selector":"#empty-test","items":[]}"##).unwrap();
    assert!(CarouselJs::new(opts).is_err());

    let opts = js_sys::JSON::parse(r##"{"selector":"#empty-test"}"##).unwrap();
    assert!(CarouselJs::new(opts).is_err());
}

#[wasm_bindgen_test]
fn test_destroy_cleans_container() {
    let root = container("destroy-test");
    let mut carousel = CarouselJs::new(options("destroy-test", 7)).unwrap();

    carousel.destroy();
    assert_eq!(root.inner_html(), "");
    assert!(!root.class_list().contains("slider"));
    assert!(root.get_attribute("role").is_none());
    assert!(!carousel.next());
    assert_eq!(carousel.state_json(), "null");
}
