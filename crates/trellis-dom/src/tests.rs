#[cfg(test)]
mod tests {
    use crate::arena::Dom;

    #[test]
    fn inner_markup_round_trip() {
        let mut dom = Dom::new();
        let body = dom.body();
        let markup = r#"<div id="a-title"><h1>T</h1><p>Tom &amp; Jerry</p></div>"#;
        dom.set_inner_markup(body, markup).unwrap();
        assert_eq!(dom.inner_markup(body), markup);
    }

    #[test]
    fn find_by_id_scans_subtree() {
        let mut dom = Dom::new();
        let body = dom.body();
        dom.set_inner_markup(
            body,
            r#"<div><ul id="u1"><li id="x-items">a</li></ul></div>"#,
        )
        .unwrap();

        let target = dom.find_by_id(body, "x-items").unwrap();
        assert_eq!(dom.tag(target), Some("li"));
        assert!(dom.find_by_id(body, "missing").is_none());
    }

    #[test]
    fn find_by_id_is_scoped_to_root() {
        let mut dom = Dom::new();
        let body = dom.body();
        let host_a = dom.create_element("div");
        let host_b = dom.create_element("div");
        dom.append_child(body, host_a).unwrap();
        dom.append_child(body, host_b).unwrap();
        dom.set_inner_markup(host_a, r#"<span id="t">a</span>"#).unwrap();

        assert!(dom.find_by_id(host_a, "t").is_some());
        assert!(dom.find_by_id(host_b, "t").is_none());
    }

    #[test]
    fn replacing_children_frees_the_old_subtree() {
        let mut dom = Dom::new();
        let body = dom.body();
        dom.set_inner_markup(body, r#"<div id="old">x</div>"#).unwrap();
        let old = dom.find_by_id(body, "old").unwrap();

        dom.set_inner_markup(body, r#"<div id="new">y</div>"#).unwrap();
        assert!(!dom.contains(old));
        assert!(dom.find_by_id(body, "new").is_some());
    }

    #[test]
    fn detach_keeps_subtree_alive() {
        let mut dom = Dom::new();
        let body = dom.body();
        let host = dom.create_element("section");
        dom.append_child(body, host).unwrap();
        dom.set_inner_markup(host, "<p>kept</p>").unwrap();

        dom.detach(host).unwrap();
        assert!(dom.inner_markup(body).is_empty());
        assert!(dom.contains(host));
        assert_eq!(dom.inner_markup(host), "<p>kept</p>");
    }

    #[test]
    fn attributes_set_get_remove() {
        let mut dom = Dom::new();
        let node = dom.create_element("div");

        assert_eq!(dom.set_attribute(node, "id", "a").unwrap(), None);
        assert_eq!(
            dom.set_attribute(node, "id", "b").unwrap(),
            Some("a".to_string())
        );
        assert_eq!(dom.attribute(node, "id"), Some("b"));
        assert_eq!(dom.remove_attribute(node, "id").unwrap(), Some("b".to_string()));
        assert_eq!(dom.attribute(node, "id"), None);
    }

    #[test]
    fn text_content_decodes_entities() {
        let mut dom = Dom::new();
        let body = dom.body();
        dom.set_inner_markup(body, "<p>a &lt; b</p>").unwrap();
        assert_eq!(dom.text_content(body), "a < b");
    }
}
