//! Structured extraction of routing configuration into action/forward
//! entries, plus the duplicate-key detector.
//!
//! Extraction and duplicate annotation are two separate passes: every
//! config file in the tree is parsed into [`RouteEntry`] values first, then
//! [`annotate_duplicates`] computes per-key totals over the whole list and
//! back-annotates each entry.

use std::collections::HashMap;

use roxmltree::{Document, Node};

use super::records::{duplicate_key, RouteEntry};
use crate::error::{Result, StrutscanError};

/// Parse one routing configuration document into route entries. The
/// duplicate count and flag are left unset; they only make sense once the
/// whole tree has been parsed.
pub fn parse_routing_config(xml: &str, relative_path: &str) -> Result<Vec<RouteEntry>> {
    let document = Document::parse(xml).map_err(|e| StrutscanError::RouteConfig {
        path: relative_path.to_string(),
        message: e.to_string(),
    })?;

    // form-bean logical name -> type, last write wins on collisions
    let mut form_beans: HashMap<&str, &str> = HashMap::new();
    for bean in document
        .descendants()
        .filter(|node| node.has_tag_name("form-bean"))
        .filter(|node| has_parent(node, "form-beans"))
    {
        if let (Some(name), Some(bean_type)) = (bean.attribute("name"), bean.attribute("type")) {
            form_beans.insert(name, bean_type);
        }
    }

    let mut entries = Vec::new();
    for action in document
        .descendants()
        .filter(|node| node.has_tag_name("action"))
        .filter(|node| has_parent(node, "action-mappings"))
    {
        let action_path = action.attribute("path").unwrap_or_default();
        let action_type = action.attribute("type").unwrap_or_default();
        let action_name = action.attribute("name").unwrap_or_default();
        // unresolved lookups yield an empty string, not an error
        let form_bean_type = form_beans.get(action_name).copied().unwrap_or_default();

        let forwards: Vec<Node> = action
            .children()
            .filter(|child| child.is_element() && child.has_tag_name("forward"))
            .collect();

        if forwards.is_empty() {
            entries.push(route_entry(
                relative_path,
                form_bean_type,
                action_path,
                action_type,
                action_name,
                "",
                "",
            ));
        } else {
            for forward in forwards {
                entries.push(route_entry(
                    relative_path,
                    form_bean_type,
                    action_path,
                    action_type,
                    action_name,
                    forward.attribute("name").unwrap_or_default(),
                    forward.attribute("path").unwrap_or_default(),
                ));
            }
        }
    }

    Ok(entries)
}

fn has_parent(node: &Node, tag: &str) -> bool {
    node.parent().is_some_and(|parent| parent.has_tag_name(tag))
}

#[allow(clippy::too_many_arguments)]
fn route_entry(
    relative_path: &str,
    form_bean_type: &str,
    action_path: &str,
    action_type: &str,
    action_name: &str,
    forward_name: &str,
    forward_path: &str,
) -> RouteEntry {
    RouteEntry {
        relative_path: relative_path.to_string(),
        form_bean_type: form_bean_type.to_string(),
        action_path: action_path.to_string(),
        action_type: action_type.to_string(),
        action_name: action_name.to_string(),
        forward_name: forward_name.to_string(),
        forward_path: forward_path.to_string(),
        duplicate_key: duplicate_key(action_path, form_bean_type, forward_name),
        duplicate_count: 0,
        is_duplicate: false,
    }
}

/// Second pass over all parsed entries: count how many share each duplicate
/// key and back-annotate every entry with its total and flag.
pub fn annotate_duplicates(entries: &mut [RouteEntry]) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for entry in entries.iter() {
        *counts.entry(entry.duplicate_key.clone()).or_insert(0) += 1;
    }

    for entry in entries.iter_mut() {
        let count = counts.get(&entry.duplicate_key).copied().unwrap_or(1);
        entry.duplicate_count = count;
        entry.is_duplicate = count > 1;
    }
}

/// Distinct duplicate keys with a count above one, for the run summary
pub fn duplicate_groups(entries: &[RouteEntry]) -> Vec<(String, usize)> {
    let mut groups: Vec<(String, usize)> = Vec::new();
    for entry in entries {
        if entry.is_duplicate
            && !groups.iter().any(|(key, _)| key == &entry.duplicate_key)
        {
            groups.push((entry.duplicate_key.clone(), entry.duplicate_count));
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::records::EMPTY_FIELD;

    const SAMPLE: &str = r#"
        <struts-config>
          <form-beans>
            <form-bean name="userForm" type="com.x.UserForm"/>
          </form-beans>
          <action-mappings>
            <action path="/user/list" name="userForm" type="com.x.ListAction">
              <forward name="success" path="/list.jsp"/>
              <forward name="fail" path="/error.jsp"/>
            </action>
          </action-mappings>
        </struts-config>
    "#;

    #[test]
    fn one_entry_per_forward_sharing_the_action_fields() {
        let mut entries = parse_routing_config(SAMPLE, "conf/struts-config.xml").unwrap();
        annotate_duplicates(&mut entries);

        assert_eq!(entries.len(), 2);
        for entry in &entries {
            assert_eq!(entry.relative_path, "conf/struts-config.xml");
            assert_eq!(entry.action_path, "/user/list");
            assert_eq!(entry.action_type, "com.x.ListAction");
            assert_eq!(entry.action_name, "userForm");
            assert_eq!(entry.form_bean_type, "com.x.UserForm");
            assert_eq!(entry.duplicate_count, 1);
            assert!(!entry.is_duplicate);
        }
        assert_eq!(entries[0].duplicate_key, "/user/list_com.x.UserForm_success");
        assert_eq!(entries[1].duplicate_key, "/user/list_com.x.UserForm_fail");
        assert_eq!(entries[0].forward_path, "/list.jsp");
        assert_eq!(entries[1].forward_path, "/error.jsp");
    }

    #[test]
    fn action_without_forwards_yields_one_entry_with_empty_forward() {
        let xml = r#"
            <struts-config>
              <action-mappings>
                <action path="/ping" type="com.x.PingAction"/>
              </action-mappings>
            </struts-config>
        "#;
        let entries = parse_routing_config(xml, "struts.xml").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].forward_name, "");
        assert_eq!(entries[0].forward_path, "");
        assert_eq!(
            entries[0].duplicate_key,
            format!("/ping_{}_{}", EMPTY_FIELD, EMPTY_FIELD)
        );
    }

    #[test]
    fn unresolved_form_bean_lookup_is_an_empty_string() {
        let xml = r#"
            <struts-config>
              <action-mappings>
                <action path="/a" name="missingForm" type="com.x.A"/>
              </action-mappings>
            </struts-config>
        "#;
        let entries = parse_routing_config(xml, "struts.xml").unwrap();
        assert_eq!(entries[0].form_bean_type, "");
    }

    #[test]
    fn last_form_bean_wins_on_name_collisions() {
        let xml = r#"
            <struts-config>
              <form-beans>
                <form-bean name="f" type="com.x.First"/>
                <form-bean name="f" type="com.x.Second"/>
              </form-beans>
              <action-mappings>
                <action path="/a" name="f" type="com.x.A"/>
              </action-mappings>
            </struts-config>
        "#;
        let entries = parse_routing_config(xml, "struts.xml").unwrap();
        assert_eq!(entries[0].form_bean_type, "com.x.Second");
    }

    #[test]
    fn duplicates_are_detected_across_files() {
        let xml = r#"
            <struts-config>
              <action-mappings>
                <action path="/dup" type="com.x.A">
                  <forward name="ok" path="/one.jsp"/>
                </action>
              </action-mappings>
            </struts-config>
        "#;
        let mut entries = parse_routing_config(xml, "module-a/struts.xml").unwrap();
        entries.extend(parse_routing_config(xml, "module-b/struts.xml").unwrap());
        annotate_duplicates(&mut entries);

        assert_eq!(entries.len(), 2);
        for entry in &entries {
            assert_eq!(entry.duplicate_count, 2);
            assert!(entry.is_duplicate);
        }
        assert_eq!(duplicate_groups(&entries).len(), 1);
    }

    #[test]
    fn malformed_xml_is_fatal() {
        let result = parse_routing_config("<struts-config>", "bad.xml");
        assert!(matches!(result, Err(StrutscanError::RouteConfig { .. })));
    }
}
