use super::*;
use crate::render::drawable::SolidColor;
use crate::scene::node::Node;

fn three_by_three(scene: &mut Scene) -> NodeId {
    scene
        .insert_grid(
            "grid",
            GridSpec {
                rows: 3,
                cols: 3,
                cell_width: 120,
                cell_height: 100,
                padding: 20,
            },
        )
        .unwrap()
}

fn panel(scene: &mut Scene, name: &str) -> NodeId {
    scene.insert(Node::new(name, 100, 80).drawn_by(SolidColor::opaque(9, 9, 9)))
}

#[test]
fn grid_node_size_follows_pitch() {
    let mut scene = Scene::new();
    let grid = three_by_three(&mut scene);
    // 3*120 + 2*20 by 3*100 + 2*20
    assert_eq!(scene.width(grid), 400);
    assert_eq!(scene.height(grid), 340);
}

#[test]
fn zero_capacity_is_rejected() {
    let mut scene = Scene::new();
    let bad = GridSpec {
        rows: 0,
        ..GridSpec::default()
    };
    assert!(matches!(
        scene.insert_grid("bad", bad),
        Err(SceneError::Validation(_))
    ));
}

#[test]
fn place_positions_attaches_and_round_trips() {
    let mut scene = Scene::new();
    let grid = three_by_three(&mut scene);
    let child = panel(&mut scene, "p");

    scene.place(grid, child, 1, 2).unwrap();
    assert_eq!(scene.parent(child), Some(grid));
    // col*(120+20), row*(100+20)
    assert_eq!(scene.node(child).position(), PixelPos::new(280, 120));
    assert_eq!(scene.grid_position(grid, child), Some((1, 2)));
}

#[test]
fn place_out_of_bounds_reports_failure_without_attaching() {
    let mut scene = Scene::new();
    let grid = three_by_three(&mut scene);
    let child = panel(&mut scene, "p");

    assert!(matches!(
        scene.place(grid, child, 3, 0),
        Err(SceneError::Placement(_))
    ));
    assert!(matches!(
        scene.place(grid, child, 0, 7),
        Err(SceneError::Placement(_))
    ));
    assert_eq!(scene.parent(child), None);
    assert_eq!(scene.grid_position(grid, child), None);
}

#[test]
fn place_moves_a_child_between_cells() {
    let mut scene = Scene::new();
    let grid = three_by_three(&mut scene);
    let child = panel(&mut scene, "p");

    scene.place(grid, child, 0, 0).unwrap();
    scene.place(grid, child, 2, 1).unwrap();

    assert_eq!(scene.grid_position(grid, child), Some((2, 1)));
    assert_eq!(scene.grid_cells(grid).unwrap().len(), 1);
    assert_eq!(scene.children(grid), &[child]);
}

#[test]
fn place_onto_occupied_cell_keeps_prior_occupants_entry() {
    let mut scene = Scene::new();
    let grid = three_by_three(&mut scene);
    let first = panel(&mut scene, "first");
    let second = panel(&mut scene, "second");

    scene.place(grid, first, 0, 0).unwrap();
    scene.place(grid, second, 0, 0).unwrap();

    // Both entries point at (0, 0); assignment is keyed by child.
    assert_eq!(scene.grid_position(grid, first), Some((0, 0)));
    assert_eq!(scene.grid_position(grid, second), Some((0, 0)));
    assert_eq!(scene.grid_cells(grid).unwrap().len(), 2);
}

#[test]
fn place_auto_fills_row_major() {
    let mut scene = Scene::new();
    let grid = three_by_three(&mut scene);
    let mut placed = Vec::new();
    for i in 0..9 {
        let child = panel(&mut scene, &format!("p{i}"));
        scene.place_auto(grid, child).unwrap();
        placed.push(child);
    }

    for (i, &child) in placed.iter().enumerate() {
        let expect = ((i / 3) as u32, (i % 3) as u32);
        assert_eq!(scene.grid_position(grid, child), Some(expect));
    }
}

#[test]
fn place_auto_on_full_grid_fails_without_mutation() {
    let mut scene = Scene::new();
    let grid = scene
        .insert_grid(
            "tiny",
            GridSpec {
                rows: 1,
                cols: 1,
                ..GridSpec::default()
            },
        )
        .unwrap();
    let a = panel(&mut scene, "a");
    let b = panel(&mut scene, "b");
    scene.place_auto(grid, a).unwrap();

    assert!(matches!(
        scene.place_auto(grid, b),
        Err(SceneError::Placement(_))
    ));
    assert_eq!(scene.parent(b), None);
    assert_eq!(scene.children(grid), &[a]);
    assert_eq!(scene.grid_cells(grid).unwrap().len(), 1);
}

#[test]
fn remove_clears_assignment_and_detaches() {
    let mut scene = Scene::new();
    let grid = three_by_three(&mut scene);
    let child = panel(&mut scene, "p");
    scene.place(grid, child, 1, 1).unwrap();

    scene.remove_from_grid(grid, child).unwrap();
    assert_eq!(scene.grid_position(grid, child), None);
    assert_eq!(scene.parent(child), None);
    assert!(scene.children(grid).is_empty());
}

#[test]
fn detach_alone_also_clears_the_cell_assignment() {
    let mut scene = Scene::new();
    let grid = three_by_three(&mut scene);
    let child = panel(&mut scene, "p");
    scene.place(grid, child, 0, 1).unwrap();

    scene.detach(child);
    assert_eq!(scene.grid_position(grid, child), None);
}

#[test]
fn resize_keeps_reflows_and_evicts() {
    let mut scene = Scene::new();
    let grid = three_by_three(&mut scene);
    let mut placed = Vec::new();
    for i in 0..9 {
        let child = panel(&mut scene, &format!("p{i}"));
        scene.place_auto(grid, child).unwrap();
        placed.push(child);
    }

    scene.resize_grid(grid, 2, 2).unwrap();

    // Children whose original (row, col) are both < 2 keep their cells.
    for (i, &child) in placed.iter().enumerate() {
        let (row, col) = ((i / 3) as u32, (i % 3) as u32);
        if row < 2 && col < 2 {
            assert_eq!(scene.grid_position(grid, child), Some((row, col)));
            assert_eq!(scene.parent(child), Some(grid));
        } else {
            assert_eq!(scene.grid_position(grid, child), None);
            assert_eq!(scene.parent(child), None);
        }
    }
    assert_eq!(scene.children(grid).len(), 4);

    // Pitch-derived size follows the new capacity.
    assert_eq!(scene.width(grid), 260);
    assert_eq!(scene.height(grid), 220);
}

#[test]
fn resize_reassigns_when_cells_free_up() {
    let mut scene = Scene::new();
    let grid = scene
        .insert_grid(
            "grid",
            GridSpec {
                rows: 1,
                cols: 3,
                cell_width: 10,
                cell_height: 10,
                padding: 0,
            },
        )
        .unwrap();
    let a = panel(&mut scene, "a");
    let b = panel(&mut scene, "b");
    scene.place(grid, a, 0, 0).unwrap();
    scene.place(grid, b, 0, 2).unwrap();

    // One column disappears but a free cell remains for `b`.
    scene.resize_grid(grid, 1, 2).unwrap();
    assert_eq!(scene.grid_position(grid, a), Some((0, 0)));
    assert_eq!(scene.grid_position(grid, b), Some((0, 1)));
    assert_eq!(scene.parent(b), Some(grid));
}

#[test]
fn grid_ops_on_plain_node_are_validation_errors() {
    let mut scene = Scene::new();
    let plain = scene.insert(Node::new("plain", 10, 10));
    let child = panel(&mut scene, "p");

    assert!(matches!(
        scene.place(plain, child, 0, 0),
        Err(SceneError::Validation(_))
    ));
    assert!(matches!(
        scene.place_auto(plain, child),
        Err(SceneError::Validation(_))
    ));
    assert!(matches!(
        scene.resize_grid(plain, 2, 2),
        Err(SceneError::Validation(_))
    ));
    assert_eq!(scene.grid_position(plain, child), None);
}
