use crate::ir::inst::{InstKind, Instruction};
use crate::ir::InstId;

use super::InstList;

fn arena(n: usize) -> Vec<Instruction> {
    (0..n)
        .map(|i| Instruction::new(InstId(i as u32), InstKind::Const { value: 0 }, Vec::new()))
        .collect()
}

fn ids(list: &InstList, arena: &[Instruction]) -> Vec<u32> {
    list.iter(arena).map(|id| id.0).collect()
}

#[test]
fn insert_tail_appends() {
    let mut arena = arena(3);
    let mut list = InstList::new();
    for i in 0..3 {
        list.insert_tail(&mut arena, InstId(i));
    }
    assert_eq!(ids(&list, &arena), vec![0, 1, 2]);
    assert_eq!(list.head(), Some(InstId(0)));
    assert_eq!(list.tail(), Some(InstId(2)));
}

#[test]
fn insert_head_prepends() {
    let mut arena = arena(3);
    let mut list = InstList::new();
    for i in 0..3 {
        list.insert_head(&mut arena, InstId(i));
    }
    assert_eq!(ids(&list, &arena), vec![2, 1, 0]);
}

#[test]
fn insert_before_and_after() {
    let mut arena = arena(4);
    let mut list = InstList::new();
    list.insert_tail(&mut arena, InstId(0));
    list.insert_tail(&mut arena, InstId(1));
    list.insert_after(&mut arena, InstId(0), InstId(2));
    list.insert_before(&mut arena, InstId(0), InstId(3));
    assert_eq!(ids(&list, &arena), vec![3, 0, 2, 1]);
}

#[test]
fn insert_after_tail_updates_tail() {
    let mut arena = arena(2);
    let mut list = InstList::new();
    list.insert_tail(&mut arena, InstId(0));
    list.insert_after(&mut arena, InstId(0), InstId(1));
    assert_eq!(list.tail(), Some(InstId(1)));
}

#[test]
fn remove_returns_the_successor() {
    let mut arena = arena(3);
    let mut list = InstList::new();
    for i in 0..3 {
        list.insert_tail(&mut arena, InstId(i));
    }
    assert_eq!(list.remove(&mut arena, InstId(1)), Some(InstId(2)));
    assert_eq!(ids(&list, &arena), vec![0, 2]);
    assert_eq!(list.remove(&mut arena, InstId(2)), None);
    assert_eq!(ids(&list, &arena), vec![0]);
}

#[test]
fn removed_node_links_are_zeroed() {
    let mut arena = arena(3);
    let mut list = InstList::new();
    for i in 0..3 {
        list.insert_tail(&mut arena, InstId(i));
    }
    list.remove(&mut arena, InstId(1));
    assert_eq!(arena[1].prev(), None);
    assert_eq!(arena[1].next(), None);
}

#[test]
fn remove_head_and_tail() {
    let mut arena = arena(3);
    let mut list = InstList::new();
    for i in 0..3 {
        list.insert_tail(&mut arena, InstId(i));
    }
    assert_eq!(list.remove_head(&mut arena), Some(InstId(0)));
    assert_eq!(list.remove_tail(&mut arena), Some(InstId(2)));
    assert_eq!(ids(&list, &arena), vec![1]);

    assert_eq!(list.remove_tail(&mut arena), Some(InstId(1)));
    assert!(list.is_empty());
    assert_eq!(list.remove_head(&mut arena), None);
}

#[test]
fn reverse_iteration() {
    let mut arena = arena(4);
    let mut list = InstList::new();
    for i in 0..4 {
        list.insert_tail(&mut arena, InstId(i));
    }
    let rev: Vec<u32> = list.iter_rev(&arena).map(|id| id.0).collect();
    assert_eq!(rev, vec![3, 2, 1, 0]);
}

#[test]
fn removed_node_can_be_reinserted() {
    let mut arena = arena(2);
    let mut list = InstList::new();
    list.insert_tail(&mut arena, InstId(0));
    list.insert_tail(&mut arena, InstId(1));
    list.remove(&mut arena, InstId(0));
    list.insert_tail(&mut arena, InstId(0));
    assert_eq!(ids(&list, &arena), vec![1, 0]);
}
