use mazescript::maze::{verify_path, Action, Direction, Maze, PathError, Pos};
use mazescript::{evaluate_as_solver, ErrorKind, Value};
use pretty_assertions::assert_eq;

/// Greedy routing toward the goal, falling back to the right-hand rule
/// whenever no productive direction is open.
const ROUTING: &str = r#"
    var abs = fn (x) {
        if (x < 0) return -x;
        else return x;
    };

    var MD = fn (p_x, p_y, q_x, q_y) {
        return abs(p_x - q_x) + abs(p_y - q_y);
    };

    var try_move = fn (p_x, p_y, dir) {
        if (dir == right) {
            if (!is_wall(p_x + 1, p_y)) {
                move(dir);
                return true;
            } else return false;
        } else if (dir == up) {
            if (!is_wall(p_x, p_y - 1)) {
                move(dir);
                return true;
            } else return false;
        } else if (dir == left) {
            if (!is_wall(p_x - 1, p_y)) {
                move(dir);
                return true;
            } else return false;
        } else if (dir == down) {
            if (!is_wall(p_x, p_y + 1)) {
                move(dir);
                return true;
            } else return false;
        }
    };

    var find_productive_path = fn (src_x, src_y, dst_x, dst_y) {
        if (src_x < dst_x && !is_wall(src_x + 1, src_y)) {
            return right;
        } else if (src_x > dst_x && !is_wall(src_x - 1, src_y)) {
            return left;
        } else if (src_y < dst_y && !is_wall(src_x, src_y + 1)) {
            return down;
        } else if (src_y > dst_y && !is_wall(src_x, src_y - 1)) {
            return up;
        }

        return -1;
    };

    var left_selection_try_order = fn (src_x, src_y, dst_x, dst_y) {
        if (src_x < dst_x) {
            if (src_y > dst_y) {
                return [left, down];
            } else if (src_y < dst_y) {
                return [up, left];
            } else {
                return [up, left, down];
            }
        } else if (src_x > dst_x) {
            if (src_y > dst_y) {
                return [down, right];
            } else if (src_y < dst_y) {
                return [right, up];
            } else {
                return [down, right, up];
            }
        } else {
            if (src_y > dst_y) {
                return [left, down, right];
            } else if (src_y < dst_y) {
                return [right, up, left];
            } else {
                return [];
            }
        }
    };

    var right_hand_rule_try_order = fn (last_move) {
        if (last_move == up) {
            return [right, up, left, down];
        } else if (last_move == down) {
            return [left, down, right, up];
        } else if (last_move == left) {
            return [up, left, down, right];
        } else if (last_move == right) {
            return [down, right, up, left];
        }
    };

    var main = fn (goal_x, goal_y) {
        var MD_best = MD(get_x(), get_y(), goal_x, goal_y);
        while (get_x() != goal_x || get_y() != goal_y) {
            print(get_x(), get_y());
            var productive_dir = find_productive_path(get_x(), get_y(), goal_x, goal_y);
            if (productive_dir != -1) {
                move(productive_dir);
            } else {
                MD_best = MD(get_x(), get_y(), goal_x, goal_y);
                var try_order = left_selection_try_order(get_x(), get_y(), goal_x, goal_y);
                var last_move = -1;

                var i = 0;
                while (i < len(try_order)) {
                    var dir = try_order[i];
                    i = i + 1;

                    if (try_move(get_x(), get_y(), dir)) {
                        last_move = dir;
                        break;
                    }
                }

                # unsolvable
                if (last_move == -1) return;

                while (MD(get_x(), get_y(), goal_x, goal_y) != MD_best || find_productive_path(get_x(), get_y(), goal_x, goal_y) == -1) {
                    var try_order = right_hand_rule_try_order(last_move);

                    var i = 0;
                    while (i < len(try_order)) {
                        var dir = try_order[i];
                        i = i + 1;

                        var at_best = MD(get_x(), get_y(), goal_x, goal_y) == MD_best;
                        if (at_best && get_x() < goal_x && dir == right) continue;
                        if (at_best && get_x() > goal_x && dir == left) continue;
                        if (at_best && get_y() < goal_y && dir == up) continue;
                        if (at_best && get_y() > goal_y && dir == down) continue;

                        if (try_move(get_x(), get_y(), dir)) {
                            last_move = dir;
                            break;
                        }
                    }
                }
            }
        }
    };
"#;

/// Depth-first search with a visited list, backtracking by moving back.
const DFS: &str = r#"
    var visited = [];

    var key = fn (x, y) { return y * 1000 + x; };

    var contains = fn (items, v) {
        for (var i = 0; i < len(items); i = i + 1) {
            if (items[i] == v) return true;
        }
        return false;
    };

    var dx = fn (dir) {
        if (dir == right) return 1;
        if (dir == left) return -1;
        return 0;
    };

    var dy = fn (dir) {
        if (dir == down) return 1;
        if (dir == up) return -1;
        return 0;
    };

    var opposite = fn (dir) {
        if (dir == right) return left;
        if (dir == left) return right;
        if (dir == up) return down;
        return up;
    };

    var search = fn (gx, gy) {
        var x = get_x();
        var y = get_y();
        if (x == gx && y == gy) return true;
        push(visited, key(x, y));

        var dirs = [right, down, left, up];
        for (var i = 0; i < len(dirs); i = i + 1) {
            var dir = dirs[i];
            var nx = x + dx(dir);
            var ny = y + dy(dir);
            if (!contains(visited, key(nx, ny)) && !is_wall(nx, ny)) {
                move(dir);
                if (search(gx, gy)) return true;
                move(opposite(dir));
            }
        }
        return false;
    };

    var main = fn (gx, gy) {
        return search(gx, gy);
    };
"#;

fn only_forward() -> Maze {
    Maze::from_rows(&["S ###", "# ###", "#   #", "###E#"]).unwrap()
}

fn no_forks() -> Maze {
    Maze::from_rows(&["S    ", "#### ", "   # ", "E#   "]).unwrap()
}

fn full() -> Maze {
    Maze::from_rows(&[
        "## #### ##",
        "#S       #",
        "## #### ##",
        "#  #      ",
        "#  ## ####",
        "####     #",
        "#E# #### #",
        "# #   ## #",
        "#   #    #",
    ])
    .unwrap()
}

#[test]
fn routing_only_forward() {
    let (solver, _) = evaluate_as_solver(ROUTING).unwrap();
    let maze = only_forward();
    let path = solver.solve(&maze).unwrap();
    assert_eq!(verify_path(&path, &maze), Ok(()));
}

#[test]
fn routing_no_forks() {
    let (solver, _) = evaluate_as_solver(ROUTING).unwrap();
    let maze = no_forks();
    let path = solver.solve(&maze).unwrap();
    assert_eq!(verify_path(&path, &maze), Ok(()));
}

#[test]
fn routing_full() {
    let (solver, output) = evaluate_as_solver(ROUTING).unwrap();
    let maze = full();
    let path = solver.solve(&maze).unwrap();
    assert_eq!(verify_path(&path, &maze), Ok(()));
    assert_eq!(output.lines().first().map(String::as_str), Some("1 1"));
}

#[test]
fn routing_gives_up_when_boxed_in() {
    let (solver, _) = evaluate_as_solver(ROUTING).unwrap();
    let maze = Maze::from_rows(&["S#E"]).unwrap();
    let path = solver.solve(&maze).unwrap();
    assert_eq!(path, vec![Action::Lookup { pos: Pos::new(1, 0) }]);
    assert_eq!(
        verify_path(&path, &maze),
        Err(PathError::WrongEnd { pos: Pos::new(0, 0) })
    );
}

#[test]
fn dfs_solves_every_maze() {
    let (solver, _) = evaluate_as_solver(DFS).unwrap();
    for maze in [only_forward(), no_forks(), full()] {
        let run = solver.run(&maze);
        assert_eq!(run.outcome, Ok(Value::Integer(1)));
        assert_eq!(verify_path(&run.path, &maze), Ok(()));
    }
}

#[test]
fn each_run_starts_from_fresh_globals() {
    let source = "
        var count = 0;
        var main = fn (gx, gy) {
            count = count + 1;
            print(count);
        };
    ";
    let (solver, output) = evaluate_as_solver(source).unwrap();
    solver.run(&only_forward());
    solver.run(&no_forks());
    assert_eq!(output.lines(), vec!["1", "1"]);
}

#[test]
fn failed_run_keeps_recorded_actions() {
    let source = "var main = fn (gx, gy) { move(right); move(7); };";
    let (solver, _) = evaluate_as_solver(source).unwrap();
    let run = solver.run(&only_forward());
    assert_eq!(run.path, vec![Action::Move { dir: Direction::Right }]);
    assert_eq!(run.outcome.unwrap_err().kind, ErrorKind::Type);
}

#[test]
fn walking_into_a_wall_fails_verification() {
    let (solver, _) = evaluate_as_solver("var main = fn (gx, gy) { move(down); };").unwrap();
    let maze = only_forward();
    let path = solver.solve(&maze).unwrap();
    assert_eq!(
        verify_path(&path, &maze),
        Err(PathError::HitWall { step: 0, pos: Pos::new(0, 1) })
    );
}

#[test]
fn programs_may_shadow_solver_names() {
    let source = "
        var right = 5;
        var main = fn (gx, gy) { return right; };
    ";
    let (solver, _) = evaluate_as_solver(source).unwrap();
    let run = solver.run(&only_forward());
    assert_eq!(run.outcome, Ok(Value::Integer(5)));
    assert!(run.path.is_empty());
}
