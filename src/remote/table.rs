//! The ordered button table: one label and one command per grid cell.

use super::command::{CommandError, IrCommand, Protocol};
use super::geometry::ButtonIndex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building or querying a code table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table does not have one entry per grid cell.
    #[error("Code table has {actual} buttons but the grid has {expected} cells")]
    WrongLength { expected: usize, actual: usize },

    /// No button carries the requested label.
    #[error("No button labelled '{0}'")]
    UnknownLabel(String),

    /// An index past the end of the table.
    #[error("Button index {0} is out of range")]
    OutOfRange(usize),

    /// A command in the table failed to parse.
    #[error("Invalid command for button '{label}': {source}")]
    InvalidCommand {
        label: String,
        #[source]
        source: CommandError,
    },
}

/// One on-screen button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub command: IrCommand,
}

/// Labels and commands for the cable box / TV remote, row-major, four per row.
const DEFAULT_BUTTONS: [(&str, Protocol, u32, Option<u16>); 40] = [
    ("TVp", Protocol::Rc5, 0x180c, Some(13)),
    ("CBp", Protocol::PanasonicOld, 0x37c107, None),
    ("P^", Protocol::PanasonicOld, 0x36d924, None),
    ("Pv", Protocol::PanasonicOld, 0x37d904, None),
    ("<<", Protocol::PanasonicOld, 0x37291a, None),
    (">", Protocol::PanasonicOld, 0x37990c, None),
    (">>", Protocol::PanasonicOld, 0x36293a, None),
    ("->", Protocol::PanasonicOld, 0x36b129, None),
    ("Rec", Protocol::PanasonicOld, 0x375914, None),
    ("=", Protocol::PanasonicOld, 0x374117, None),
    ("s", Protocol::PanasonicOld, 0x365934, None),
    ("<-", Protocol::PanasonicOld, 0x37c906, None),
    ("Gd", Protocol::PanasonicOld, 0x36c127, None),
    ("^", Protocol::PanasonicOld, 0x36812f, None),
    ("Fav", Protocol::PanasonicOld, 0x37f101, None),
    ("Inf", Protocol::PanasonicOld, 0x36213b, None),
    ("<", Protocol::PanasonicOld, 0x37810f, None),
    ("sel", Protocol::PanasonicOld, 0x366133, None),
    (">", Protocol::PanasonicOld, 0x364137, None),
    ("Lis", Protocol::PanasonicOld, 0x36c926, None),
    ("ret", Protocol::PanasonicOld, 0x366932, None),
    ("v", Protocol::PanasonicOld, 0x37a10b, None),
    ("Prv", Protocol::PanasonicOld, 0x36e123, None),
    ("Mnu", Protocol::PanasonicOld, 0x373918, None),
    ("1", Protocol::PanasonicOld, 0x36113d, None),
    ("2", Protocol::PanasonicOld, 0x37111d, None),
    ("3", Protocol::PanasonicOld, 0x36912d, None),
    ("Ch+", Protocol::PanasonicOld, 0x377111, None),
    ("4", Protocol::PanasonicOld, 0x37910d, None),
    ("5", Protocol::PanasonicOld, 0x365135, None),
    ("6", Protocol::PanasonicOld, 0x375115, None),
    ("Ch-", Protocol::PanasonicOld, 0x36f121, None),
    ("7", Protocol::PanasonicOld, 0x36d125, None),
    ("8", Protocol::PanasonicOld, 0x37d105, None),
    ("9", Protocol::PanasonicOld, 0x363139, None),
    ("Vol+", Protocol::Rc5, 0x1810, Some(13)),
    ("Pip", Protocol::PanasonicOld, 0x37b908, None),
    ("0", Protocol::PanasonicOld, 0x373119, None),
    ("Mut", Protocol::Rc5, 0x180d, Some(13)),
    ("Vol-", Protocol::Rc5, 0x1811, Some(13)),
];

/// Ordered, immutable sequence of buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    buttons: Vec<Button>,
}

impl CodeTable {
    /// Build a table and check it has exactly `cells` entries.
    pub fn new(buttons: Vec<Button>, cells: usize) -> Result<Self, TableError> {
        if buttons.len() != cells {
            return Err(TableError::WrongLength {
                expected: cells,
                actual: buttons.len(),
            });
        }
        Ok(Self { buttons })
    }

    /// Build a table from `(label, command)` string pairs.
    pub fn from_pairs<'a, I>(pairs: I, cells: usize) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let buttons = pairs
            .into_iter()
            .map(|(label, command)| {
                let command = command
                    .parse()
                    .map_err(|source| TableError::InvalidCommand {
                        label: label.to_string(),
                        source,
                    })?;
                Ok(Button {
                    label: label.to_string(),
                    command,
                })
            })
            .collect::<Result<Vec<_>, TableError>>()?;
        Self::new(buttons, cells)
    }

    /// The built-in 10×4 cable box remote.
    pub fn builtin() -> Self {
        let buttons = DEFAULT_BUTTONS
            .iter()
            .map(|&(label, protocol, code, bits)| Button {
                label: label.to_string(),
                command: IrCommand::new(protocol, code, bits)
                    .expect("built-in button commands are valid"),
            })
            .collect();
        Self { buttons }
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Button at `index`, if the index is inside the table.
    pub fn get(&self, index: ButtonIndex) -> Option<&Button> {
        self.buttons.get(index.get())
    }

    /// Like [`get`](Self::get) but reports the bad index as an error.
    pub fn button(&self, index: ButtonIndex) -> Result<&Button, TableError> {
        self.get(index).ok_or(TableError::OutOfRange(index.get()))
    }

    /// First button with the given label. Labels are matched exactly.
    pub fn find_label(&self, label: &str) -> Result<(ButtonIndex, &Button), TableError> {
        self.buttons
            .iter()
            .enumerate()
            .find(|(_, b)| b.label == label)
            .map(|(i, b)| (ButtonIndex::new(i), b))
            .ok_or_else(|| TableError::UnknownLabel(label.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ButtonIndex, &Button)> {
        self.buttons
            .iter()
            .enumerate()
            .map(|(i, b)| (ButtonIndex::new(i), b))
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_has_forty_buttons() {
        let table = CodeTable::builtin();
        assert_eq!(table.len(), 40);
    }

    #[test]
    fn test_every_builtin_entry_is_valid() {
        for (i, &(label, protocol, code, bits)) in DEFAULT_BUTTONS.iter().enumerate() {
            let command = IrCommand::new(protocol, code, bits);
            assert!(command.is_ok(), "entry {i} ({label}) is invalid: {command:?}");
            assert_eq!(CodeTable::builtin().buttons()[i].label, label);
        }
    }

    #[test]
    fn test_first_and_last_buttons() {
        let table = CodeTable::builtin();
        let first = table.button(ButtonIndex::new(0)).unwrap();
        assert_eq!(first.label, "TVp");
        assert_eq!(first.command.to_string(), "3,180c,13");

        let last = table.button(ButtonIndex::new(39)).unwrap();
        assert_eq!(last.label, "Vol-");
        assert_eq!(last.command.to_string(), "3,1811,13");
    }

    #[test]
    fn test_spot_check_wire_strings() {
        let table = CodeTable::builtin();
        let wire: Vec<String> = [1, 13, 27, 35, 38]
            .into_iter()
            .map(|i| table.button(ButtonIndex::new(i)).unwrap().command.to_string())
            .collect();
        assert_eq!(
            wire,
            vec!["5,37c107", "5,36812f", "5,377111", "3,1810,13", "3,180d,13"]
        );
    }

    #[test]
    fn test_lookup_is_stable() {
        let table = CodeTable::builtin();
        let a = table.button(ButtonIndex::new(17)).unwrap().clone();
        let b = table.button(ButtonIndex::new(17)).unwrap().clone();
        assert_eq!(a, b);
        assert_eq!(a.label, "sel");
    }

    #[test]
    fn test_out_of_range() {
        let table = CodeTable::builtin();
        assert!(table.get(ButtonIndex::new(40)).is_none());
        assert!(matches!(
            table.button(ButtonIndex::new(40)),
            Err(TableError::OutOfRange(40))
        ));
    }

    #[test]
    fn test_find_label() {
        let table = CodeTable::builtin();
        let (index, button) = table.find_label("Mut").unwrap();
        assert_eq!(index, ButtonIndex::new(38));
        assert_eq!(button.command.to_string(), "3,180d,13");
        // Duplicate labels resolve to the first occurrence.
        assert_eq!(table.find_label(">").unwrap().0, ButtonIndex::new(5));
        assert!(matches!(
            table.find_label("Power"),
            Err(TableError::UnknownLabel(_))
        ));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let result = CodeTable::from_pairs([("A", "1,ff")], 40);
        assert!(matches!(
            result,
            Err(TableError::WrongLength {
                expected: 40,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_bad_command_names_label() {
        let err = CodeTable::from_pairs([("A", "9,ff")], 1).unwrap_err();
        assert!(err.to_string().contains("'A'"));
    }

    #[test]
    fn test_from_pairs() {
        let table = CodeTable::from_pairs([("On", "1,20df10ef"), ("Off", "2,a90,12")], 2).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.buttons()[1].command.bits(), Some(12));
    }
}
