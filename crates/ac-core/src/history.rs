/// Liste de versions bornée avec curseur, pour l'undo/redo de configuration.
///
/// Indépendante de tout binding UI : `push` tronque la queue de redo
/// au-delà du curseur, `undo`/`redo` déplacent le curseur sans muter les
/// entrées. Bornée : au-delà de la capacité, l'entrée la plus ancienne
/// est abandonnée.
///
/// # Example
/// ```
/// use ac_core::history::History;
/// let mut history = History::new(0, 10);
/// history.push(1);
/// history.push(2);
/// assert_eq!(history.undo(), Some(&1));
/// assert_eq!(history.redo(), Some(&2));
/// ```
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
    capacity: usize,
}

impl<T: Clone + PartialEq> History<T> {
    /// Crée un historique contenant l'état initial.
    ///
    /// `capacity` est le nombre maximal d'entrées conservées (minimum 2).
    #[must_use]
    pub fn new(initial: T, capacity: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            capacity: capacity.max(2),
        }
    }

    /// État courant pointé par le curseur.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    /// Ajoute un état : tronque la queue de redo, ignore un état identique
    /// à l'état courant.
    pub fn push(&mut self, value: T) {
        if self.entries[self.cursor] == value {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(value);
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Recule le curseur et retourne l'état atteint, ou `None` au début.
    pub fn undo(&mut self) -> Option<&T> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Avance le curseur et retourne l'état atteint, ou `None` à la fin.
    pub fn redo(&mut self) -> Option<&T> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Un undo est-il possible ?
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Un redo est-il possible ?
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Nombre d'entrées conservées.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Toujours `false` : l'historique contient au moins l'état initial.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_then_undo_redo() {
        let mut history = History::new(0, 10);
        history.push(1);
        history.push(2);
        assert_eq!(history.current(), &2);
        assert_eq!(history.undo(), Some(&1));
        assert_eq!(history.undo(), Some(&0));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some(&1));
        assert_eq!(history.redo(), Some(&2));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn push_truncates_redo_tail() {
        let mut history = History::new(0, 10);
        history.push(1);
        history.push(2);
        history.undo();
        assert!(history.can_redo());
        history.push(9);
        // La branche [2] est abandonnée.
        assert!(!history.can_redo());
        assert_eq!(history.current(), &9);
        assert_eq!(history.undo(), Some(&1));
    }

    #[test]
    fn identical_state_not_recorded() {
        let mut history = History::new(5, 10);
        history.push(5);
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut history = History::new(0, 3);
        history.push(1);
        history.push(2);
        history.push(3);
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), &3);
        // 0 est sorti par le bas : deux undo maximum.
        assert_eq!(history.undo(), Some(&2));
        assert_eq!(history.undo(), Some(&1));
        assert_eq!(history.undo(), None);
    }
}
