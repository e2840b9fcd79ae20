use super::entities::Match;

// Keeps matches sorted by descending score as they are filed.
// Equal scores stay in store order; nothing is ever merged or dropped
// unless a limit is set.
pub struct MatchCollector<'a> {
    max: Option<usize>,
    matches: &'a mut Vec<Match>,
}

impl<'a> MatchCollector<'a> {
    pub fn new(matches: &'a mut Vec<Match>, max: Option<usize>) -> MatchCollector<'a> {
        assert!(max != Some(0), "Expected a positive number for the maximum number of matches.");
        assert!(matches.is_empty(), "The pre-existing matches vector must be empty.");
        MatchCollector { max, matches }
    }

    // True if `a` belongs before `b` in the ranking
    fn ranks_before(a: &Match, b: &Match) -> bool {
        a.score > b.score || (a.score == b.score && a.index < b.index)
    }

    pub fn file_match(&mut self, mc: Match) {
        // Already at limit: don't bother if new match ranks below the current last
        if let (Some(max), Some(last)) = (self.max, self.matches.last()) {
            if self.matches.len() == max && !Self::ranks_before(&mc, last) {
                return;
            }
        }
        // Where does new match go? Best match is always at start of vector.
        let ix = self.matches.iter().position(|x| Self::ranks_before(&mc, x));
        match ix {
            Some(ix) => self.matches.insert(ix, mc),
            None => self.matches.push(mc),
        }
        // Beyond limit? Drop last item.
        if let Some(max) = self.max {
            if self.matches.len() > max {
                self.matches.pop();
            }
        }
    }

    // Writes each match's position into its `rank`
    pub fn assign_ranks(self) {
        for (rank, mc) in self.matches.iter_mut().enumerate() {
            mc.rank = rank;
        }
    }
}
