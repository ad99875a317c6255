use waypoint::testing::RecordingAction;
use waypoint::{ActionDef, ActionUnit, Namespace, Outcome, PathRouter, RegistrationError, RouterOptions};

#[test]
fn literal_branch_beats_wildcard_branch() {
    let mut builder = PathRouter::<String>::builder();
    let wild = RecordingAction::new("wild");
    let literal = RecordingAction::new("literal");
    builder
        .add_action(ActionDef::new(
            "/user/{id}",
            ActionUnit::singleton(wild.clone()),
        ))
        .unwrap();
    builder
        .add_action(ActionDef::new(
            "/user/new",
            ActionUnit::singleton(literal.clone()),
        ))
        .unwrap();
    let router = builder.build();

    let outcome = router.dispatch("/user/new", Vec::new()).unwrap();
    assert_eq!(outcome, Outcome::text("literal"));
    assert_eq!(wild.count(), 0);

    let outcome = router.dispatch("/user/42", Vec::new()).unwrap();
    assert_eq!(outcome, Outcome::text("wild"));
    assert_eq!(wild.calls()[0].1["id"], "42");
}

#[test]
fn duplicate_exact_path_is_a_conflict() {
    let mut builder = PathRouter::<String>::builder();
    builder
        .add_action(ActionDef::new(
            "/user/list",
            ActionUnit::singleton(RecordingAction::new("first")),
        ))
        .unwrap();
    let second = builder.add_action(ActionDef::new(
        "/user/list",
        ActionUnit::singleton(RecordingAction::new("second")),
    ));
    assert!(matches!(second, Err(RegistrationError::DuplicatePath(_))));
}

#[test]
fn ambiguous_wildcard_overlap_is_permitted() {
    let mut builder = PathRouter::<String>::builder();
    builder
        .add_action(ActionDef::new(
            "/a/{x}",
            ActionUnit::singleton(RecordingAction::new("wild")),
        ))
        .unwrap();
    builder
        .add_action(ActionDef::new(
            "/a/b",
            ActionUnit::singleton(RecordingAction::new("literal")),
        ))
        .unwrap();
    let router = builder.build();
    assert_eq!(router.action_count(), 2);
    assert_eq!(
        router.dispatch("/a/b", Vec::new()).unwrap(),
        Outcome::text("literal")
    );
    assert_eq!(
        router.dispatch("/a/c", Vec::new()).unwrap(),
        Outcome::text("wild")
    );
}

#[test]
fn namespaces_prefix_their_actions() {
    let mut builder = PathRouter::<String>::builder();
    builder
        .add_action(
            ActionDef::new("list", ActionUnit::singleton(RecordingAction::new("list")))
                .in_namespace(Namespace::new("admin")),
        )
        .unwrap();
    builder
        .add_action(
            ActionDef::new("/top", ActionUnit::singleton(RecordingAction::new("top")))
                .in_namespace(Namespace::new("admin")),
        )
        .unwrap();
    let router = builder.build();

    assert_eq!(
        router.dispatch("/admin/list", Vec::new()).unwrap(),
        Outcome::text("list")
    );
    // an absolute name ignores its namespace
    assert_eq!(
        router.dispatch("/top", Vec::new()).unwrap(),
        Outcome::text("top")
    );
}

#[test]
fn registration_paths_are_normalized() {
    let mut builder = PathRouter::<String>::builder();
    builder
        .add_action(ActionDef::new(
            " user/list/ ",
            ActionUnit::singleton(RecordingAction::new("ok")),
        ))
        .unwrap();
    let router = builder.build();
    assert_eq!(
        router.dispatch("/user/list", Vec::new()).unwrap(),
        Outcome::text("ok")
    );
}

#[test]
fn separator_is_configurable() {
    let options = RouterOptions {
        path_separator: ':',
        path_suffix: String::new(),
        ..RouterOptions::default()
    };
    let mut builder = waypoint::PathRouterBuilder::<String>::with_options(options);
    builder
        .add_action(ActionDef::new(
            "user:{id}",
            ActionUnit::singleton(RecordingAction::new("ok")),
        ))
        .unwrap();
    let router = builder.build();
    assert_eq!(
        router.dispatch(":user:42", Vec::new()).unwrap(),
        Outcome::text("ok")
    );
}

#[test]
fn empty_action_name_is_rejected() {
    let mut builder = PathRouter::<String>::builder();
    let result = builder.add_action(ActionDef::new(
        "  ",
        ActionUnit::singleton(RecordingAction::new("ok")),
    ));
    assert!(matches!(result, Err(RegistrationError::EmptyName("action"))));
}
