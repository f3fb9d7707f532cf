//! Tests for the tab separated surface and content renderings

#[cfg(test)]
mod tests {
    use piecegrid::spatial::render;
    use piecegrid::{Cell, Grid};

    // Tests the surface layout: header, level heading, rows of `height` entries
    // Verified by breaking rows on width instead of height
    #[test]
    fn test_surface_layout() {
        let mut grid: Grid<u8> = Grid::new();
        assert!(grid.create(2, 3, 1).is_ok());
        assert!(grid.paint((1, 2), "#").is_ok());

        let expected = "\tGrid Surface\n\n\tLevel 1:\n\t-\t#\t-\n\t-\t-\t-\n\n";
        assert_eq!(render::surface(&grid), expected);
        assert_eq!(grid.print_surface(), expected);
    }

    // Tests single occupants show their name and crowded locations their count
    #[test]
    fn test_content_names_and_counts() {
        let mut grid = Grid::with_cell(Cell::square().with_max_objs(0));
        assert!(grid.create(2, 2, 2).is_ok());
        assert!(grid.add((1, 1, 1), 1, "K").is_ok());
        assert!(grid.add((2, 2, 2), 2, "x").is_ok());
        assert!(grid.add((2, 2, 2), 3, "y").is_ok());

        let expected = concat!(
            "\tGrid Content\n",
            "\n\tLevel 1:\n\tK\t-\n\t-\t-\n",
            "\n\tLevel 2:\n\t-\t-\n\t-\t2\n",
            "\n",
        );
        assert_eq!(render::content(&grid), expected);
    }

    // Tests the cell icon is rendered for unpainted locations
    #[test]
    fn test_surface_uses_icon() {
        let mut cell = Cell::square();
        cell.set_icon(".");
        let mut grid: Grid<u8> = Grid::with_cell(cell);
        assert!(grid.create(1, 2, 1).is_ok());
        assert_eq!(render::surface(&grid), "\tGrid Surface\n\n\tLevel 1:\n\t.\t.\n\n");
    }

    #[test]
    fn test_uncreated_grid_messages() {
        let grid: Grid<u8> = Grid::new();
        assert_eq!(grid.print_surface(), "The grid's surface is blank.\n");
        assert_eq!(grid.print_content(), "The grid is empty.\n");
        assert_eq!(
            grid.to_string(),
            "The grid's surface is blank.\nThe grid is empty.\n"
        );
    }
}
