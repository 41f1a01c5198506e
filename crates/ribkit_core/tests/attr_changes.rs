use ribkit_core::{compose, InstanceError, Mixin, CHANGE_EVENT};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

fn model_instance() -> ribkit_core::Instance {
    compose(vec![Mixin::new("model")
        .default_value("foo", json!(null))
        .default_value("bar", json!(null))])
    .unwrap()
    .construct(&[])
    .unwrap()
}

#[test]
fn change_listener_observes_transitions_in_order() {
    let mut instance = model_instance();
    let seen: Rc<RefCell<Vec<Vec<Value>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    instance
        .on(CHANGE_EVENT, move |_, args| {
            sink.borrow_mut().push(args.to_vec());
            Ok(())
        })
        .unwrap();

    instance.set_attr("foo", json!(true)).unwrap();
    instance.set_attr("bar", json!(false)).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            vec![json!("foo"), json!(true)],
            vec![json!("bar"), json!(false)],
        ]
    );
}

#[test]
fn setting_an_equal_value_fires_no_change() {
    let mut instance = model_instance();
    let fired = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&fired);

    instance
        .on(CHANGE_EVENT, move |_, _| {
            *sink.borrow_mut() += 1;
            Ok(())
        })
        .unwrap();

    assert!(instance.set_attr("foo", json!(1)).unwrap());
    assert!(!instance.set_attr("foo", json!(1)).unwrap());
    assert_eq!(*fired.borrow(), 1);
}

#[test]
fn get_returns_set_values_and_defaults() {
    let mut instance = model_instance();
    assert_eq!(instance.attr("foo"), Some(&json!(null)));
    assert_eq!(instance.attr("unset"), None);

    instance.set_attr("foo", json!(1)).unwrap();
    instance.set_attr("bar", json!(2)).unwrap();
    assert_eq!(instance.attr("foo"), Some(&json!(1)));
    assert_eq!(instance.attr("bar"), Some(&json!(2)));
}

#[test]
fn attrs_equals_sets_merged_with_unset_defaults() {
    let mut instance = compose(vec![Mixin::new("model")
        .default_value("foo", json!(null))
        .default_value("bar", json!(null))
        .default_value("kept", json!("default"))])
    .unwrap()
    .construct(&[])
    .unwrap();

    instance.set_attr("foo", json!(3)).unwrap();
    instance.set_attr("bar", json!(4)).unwrap();

    let mut expected = BTreeMap::new();
    expected.insert("foo".to_string(), json!(3));
    expected.insert("bar".to_string(), json!(4));
    expected.insert("kept".to_string(), json!("default"));
    assert_eq!(instance.attrs(), &expected);
}

#[test]
fn batch_updates_flow_through_the_single_key_path() {
    let mut instance = model_instance();
    let seen: Rc<RefCell<Vec<Vec<Value>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    instance
        .on(CHANGE_EVENT, move |_, args| {
            sink.borrow_mut().push(args.to_vec());
            Ok(())
        })
        .unwrap();

    let mut batch = BTreeMap::new();
    batch.insert("foo".to_string(), json!(3));
    batch.insert("bar".to_string(), json!(4));
    let changed = instance.set_attrs(batch).unwrap();

    assert_eq!(changed, 2);
    assert_eq!(instance.attr("foo"), Some(&json!(3)));
    assert_eq!(instance.attr("bar"), Some(&json!(4)));
    // BTreeMap batches apply in sorted key order.
    assert_eq!(
        *seen.borrow(),
        vec![
            vec![json!("bar"), json!(4)],
            vec![json!("foo"), json!(3)],
        ]
    );
}

#[test]
fn batch_counts_only_actual_changes() {
    let mut instance = model_instance();
    instance.set_attr("foo", json!(1)).unwrap();

    let mut batch = BTreeMap::new();
    batch.insert("foo".to_string(), json!(1));
    batch.insert("bar".to_string(), json!(2));
    let changed = instance.set_attrs(batch).unwrap();
    assert_eq!(changed, 1);
}

#[test]
fn blank_attribute_key_is_rejected() {
    let mut instance = model_instance();
    let err = instance.set_attr("   ", json!(1)).unwrap_err();
    assert!(matches!(err, InstanceError::Attr(_)));
}

#[test]
fn padded_keys_read_back_through_attr() {
    let mut instance = model_instance();
    instance.set_attr("  mode ", json!("dark")).unwrap();

    assert_eq!(instance.attr("mode"), Some(&json!("dark")));
    assert_eq!(instance.attr(" mode  "), Some(&json!("dark")));
}

#[test]
fn setting_null_is_a_real_set_not_a_get() {
    let mut instance = model_instance();
    instance.set_attr("foo", json!(1)).unwrap();

    let fired = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&fired);
    instance
        .on(CHANGE_EVENT, move |_, _| {
            *sink.borrow_mut() += 1;
            Ok(())
        })
        .unwrap();

    assert!(instance.set_attr("foo", json!(null)).unwrap());
    assert_eq!(instance.attr("foo"), Some(&json!(null)));
    assert_eq!(*fired.borrow(), 1);
}

#[test]
fn change_handler_sees_updated_instance_state() {
    let mut instance = model_instance();
    let observed: Rc<RefCell<Option<Value>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&observed);

    instance
        .on(CHANGE_EVENT, move |inst, _| {
            *sink.borrow_mut() = inst.attr("foo").cloned();
            Ok(())
        })
        .unwrap();

    instance.set_attr("foo", json!("new")).unwrap();
    assert_eq!(*observed.borrow(), Some(json!("new")));
}
