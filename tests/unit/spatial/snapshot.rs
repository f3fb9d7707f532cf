//! Tests for capturing and restoring complete grid state

#[cfg(test)]
mod tests {
    use piecegrid::spatial::GridSnapshot;
    use piecegrid::{Cell, Grid, GridError, Location};

    fn populated() -> Grid<String> {
        let mut cell = Cell::square().with_max_objs(3);
        cell.set_icon("+");
        let mut grid = Grid::with_cell(cell);
        assert!(grid.create(3, 2, 2).is_ok());
        for (name, location) in [
            ("A", Location::new(1, 1, 1)),
            ("B", Location::new(1, 1, 1)),
            ("C", Location::new(3, 2, 2)),
        ] {
            assert!(grid.add(location, format!("obj-{name}"), name).is_ok());
        }
        assert!(grid.paint((2, 1, 2), "^").is_ok());
        grid
    }

    fn snapshot_of(grid: &Grid<String>) -> GridSnapshot<String> {
        match grid.snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => unreachable!("created grid failed to snapshot: {err}"),
        }
    }

    // Tests a snapshot survives JSON and rebuilds an identical grid
    #[test]
    fn test_json_round_trip_is_lossless() {
        let grid = populated();
        let snapshot = snapshot_of(&grid);

        let json = serde_json::to_string(&snapshot);
        assert!(json.is_ok());
        let decoded: Result<GridSnapshot<String>, _> =
            serde_json::from_str(json.as_deref().unwrap_or_default());
        assert!(matches!(&decoded, Ok(d) if *d == snapshot));

        let Ok(restored) = decoded.map_err(GridError::from).and_then(Grid::from_snapshot) else {
            unreachable!("valid snapshot rejected");
        };
        assert_eq!(restored.uid(), grid.uid());
        assert_eq!(restored.scope(), grid.scope());
        assert_eq!(restored.to_string(), grid.to_string());
        assert!(matches!(restored.slot("B"), Ok(1)));
        assert!(matches!(restored.piece_id("C"), Ok(id) if grid.piece_id("C").is_ok_and(|o| o == id)));
        assert_eq!(restored.cell(), grid.cell());
    }

    // Tests a restored grid keeps issuing fresh handles
    #[test]
    fn test_restored_grid_keeps_handles_unique() {
        let grid = populated();
        let Ok(mut restored) = Grid::from_snapshot(snapshot_of(&grid)) else {
            unreachable!("valid snapshot rejected");
        };
        assert!(restored.add((2, 2, 1), "obj-D".to_string(), "D").is_ok());
        let ids: Vec<_> = ["A", "B", "C", "D"]
            .iter()
            .filter_map(|name| restored.piece_id(name).ok())
            .collect();
        assert_eq!(ids.len(), 4);
        for (i, a) in ids.iter().enumerate() {
            assert!(ids.iter().skip(i + 1).all(|b| b != a));
        }
    }

    // Tests slot disagreements are rejected
    // Verified by skipping the slot check
    #[test]
    fn test_wrong_slot_rejected() {
        let mut snapshot = snapshot_of(&populated());
        for piece in &mut snapshot.pieces {
            if piece.name == "A" {
                piece.slot = 1;
            }
        }
        assert!(matches!(
            Grid::from_snapshot(snapshot),
            Err(GridError::InvalidSnapshot { .. })
        ));
    }

    // Tests layer shape mismatches are rejected
    #[test]
    fn test_layer_shape_rejected() {
        let mut snapshot = snapshot_of(&populated());
        snapshot.surface.pop();
        assert!(Grid::from_snapshot(snapshot).is_err());

        let mut snapshot = snapshot_of(&populated());
        if let Some(layer) = snapshot.content.first_mut() {
            layer.push(Vec::new());
        }
        assert!(Grid::from_snapshot(snapshot).is_err());
    }

    // Tests duplicate objects and unregistered content names are rejected
    #[test]
    fn test_inconsistent_pieces_rejected() {
        let mut snapshot = snapshot_of(&populated());
        for piece in &mut snapshot.pieces {
            if piece.name == "B" {
                piece.object = "obj-A".to_string();
            }
        }
        assert!(Grid::from_snapshot(snapshot).is_err());

        let mut snapshot = snapshot_of(&populated());
        snapshot.pieces.retain(|piece| piece.name != "C");
        assert!(Grid::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn test_uncreated_grid_has_no_snapshot() {
        let grid: Grid<String> = Grid::new();
        assert!(matches!(grid.snapshot(), Err(GridError::NotCreated { .. })));
    }

    // Tests an exhausted handle counter is refused on restore
    // Verified by accepting any next handle at or above the used ones
    #[test]
    fn test_exhausted_handles_rejected() {
        let mut empty: Grid<String> = Grid::new();
        assert!(empty.create(2, 2, 1).is_ok());
        let mut snapshot = snapshot_of(&empty);
        snapshot.next_id = u64::MAX;
        assert!(matches!(
            Grid::from_snapshot(snapshot),
            Err(GridError::InvalidSnapshot { .. })
        ));

        let mut snapshot = snapshot_of(&populated());
        for piece in &mut snapshot.pieces {
            if piece.name == "C" {
                piece.id = serde_json::from_str("18446744073709551615").unwrap_or(piece.id);
            }
        }
        snapshot.next_id = u64::MAX - 1;
        assert!(matches!(
            Grid::from_snapshot(snapshot),
            Err(GridError::InvalidSnapshot { .. })
        ));
    }

    // Tests a restored grid with one handle left places once then refuses
    #[test]
    fn test_restored_grid_runs_out_of_handles() {
        let mut empty: Grid<String> = Grid::new();
        assert!(empty.create(2, 2, 1).is_ok());
        let mut snapshot = snapshot_of(&empty);
        snapshot.next_id = u64::MAX - 1;
        let Ok(mut restored) = Grid::from_snapshot(snapshot) else {
            unreachable!("counter with room left rejected");
        };

        assert!(restored.add((1, 1), "obj-A".to_string(), "A").is_ok());
        assert!(matches!(
            restored.add((1, 2), "obj-B".to_string(), "B"),
            Err(GridError::HandlesExhausted)
        ));
        assert!(!restored.contains("B"));
        assert!(matches!(restored.occupants((1, 2)), Ok(0)));
    }
}
