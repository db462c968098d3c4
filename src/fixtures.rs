//! Reference declarations shared by unit tests, integration tests, benches and fuzz targets.

use crate::declaration::Declaration;
use crate::registry::Registry;
use crate::types::AccessControlOptions;

pub const TODO_PREFIX: &str = "com.example";

/// The todo-app declaration: 6 leaves under `todo`, `todo.crud` and `extra`.
pub fn todo_declaration() -> Declaration {
    crate::access! {
        todo: {
            view: "Enable user to view todo list page",
            toggle: "Enable user to toggle todo value",
            crud: {
                edit: "Enable user to edit todo item",
                create: "Enable user to add todo item",
                delete: "Enable user to delete todo item",
            },
        },
        extra: {
            sayHi: "Enable user to say hi",
        },
    }
}

/// [`todo_declaration`] built under [`TODO_PREFIX`] with nothing enabled.
pub fn todo_registry() -> Registry {
    Registry::new(todo_declaration(), AccessControlOptions::default().with_prefix(TODO_PREFIX))
        .expect("todo declaration has unique scopes")
}

/// A token's grant list: three prefixed scopes and one that misses the prefix.
pub fn todo_grants() -> [&'static str; 4] {
    [
        "com.example.todo.view",
        "com.example.todo.toggle",
        "com.example.todo.crud.create",
        "extra.sayHi",
    ]
}

/// A synthetic declaration with `width` children per branch, `depth` levels deep.
pub fn wide_declaration(width: usize, depth: usize) -> Declaration {
    (0..width)
        .map(|i| {
            let key = format!("n{i}");
            if depth <= 1 {
                (key.clone(), crate::Entry::Leaf(format!("Leaf {key}")))
            } else {
                (key, crate::Entry::Branch(wide_declaration(width, depth - 1)))
            }
        })
        .collect()
}
