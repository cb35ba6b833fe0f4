use super::*;

#[test]
fn scopes_are_removed_together() {
    let mut reg = ListenerRegistry::new();
    let hero = SectionId::from("hero");
    let about = SectionId::from("about");
    reg.register(&hero, ListenerKind::Scroll);
    reg.register(&hero, ListenerKind::Resize);
    let kept = reg.register(&about, ListenerKind::Scroll);

    assert_eq!(reg.count(), 3);
    assert!(reg.subscribed(&hero, ListenerKind::Resize));
    assert_eq!(reg.remove_scope(&hero), 2);
    assert_eq!(reg.remove_scope(&hero), 0);
    assert!(!reg.subscribed(&hero, ListenerKind::Scroll));
    assert_eq!(reg.count_for(&about), 1);

    assert!(reg.remove(kept));
    assert!(!reg.remove(kept));
    assert_eq!(reg.count(), 0);
}

#[test]
fn ids_are_never_reused() {
    let mut reg = ListenerRegistry::new();
    let s = SectionId::from("s");
    let a = reg.register(&s, ListenerKind::Scroll);
    reg.remove(a);
    let b = reg.register(&s, ListenerKind::Scroll);
    assert_ne!(a, b);
}
