use core::alloc::Layout;
use core::ptr::NonNull;

/// A source of raw memory for a table's combined slot buffer.
///
/// The table performs every allocation and deallocation through the same
/// `Allocator` instance, including the buffers it replaces during growth, so
/// an implementation can account for (or arena-manage) all table memory in
/// one place. Callers that keep auxiliary heap data alongside their entries
/// can reach the instance through
/// [`HashTable::allocator`](crate::HashTable::allocator) and route those
/// allocations through the same source.
///
/// Allocation is fallible: returning `None` makes the affected table
/// operation report [`Error::AllocFailed`](crate::Error::AllocFailed)
/// instead of aborting.
pub trait Allocator {
    /// Allocates a block satisfying `layout`, or `None` when no memory is
    /// available.
    ///
    /// `layout` always has a non-zero size and an alignment of at least 16
    /// when called by the table.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Releases a block previously returned by [`allocate`].
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this same allocator
    /// with this same `layout`, and must not be used after this call.
    ///
    /// [`allocate`]: Allocator::allocate
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The process-wide default allocator.
///
/// Delegates to [`alloc::alloc`](alloc::alloc::alloc) and
/// [`alloc::dealloc`](alloc::alloc::dealloc), turning a null return into
/// `None` rather than calling `handle_alloc_error`.
///
/// # Examples
///
/// ```rust
/// use probe_map::HashTable;
/// use probe_map::Global;
///
/// let table: HashTable<u64, u64> = HashTable::try_new_in(Global).unwrap();
/// assert!(table.is_empty());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert!(layout.size() != 0);
        // SAFETY: The trait contract guarantees a non-zero layout size.
        NonNull::new(unsafe { alloc::alloc::alloc(layout) })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: The caller guarantees `ptr` came from `allocate` with the
        // same layout.
        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

impl<A> Allocator for &A
where
    A: Allocator,
{
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Forwarded contract; `ptr` and `layout` come from the same
        // underlying allocator.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}
